//! cdroot: a small blog backend and its navigation client.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /request?action=...
//!            │
//!            ▼
//!     ┌─────────────┐    ┌──────────────┐    ┌──────────────────────┐
//!     │ http server │───▶│   dispatch   │───▶│        model         │
//!     │  (axum)     │    │    chain     │    │ documents + records  │
//!     └─────────────┘    └──────────────┘    └──────────────────────┘
//!            │                                  │            │
//!            ▼                                  ▼            ▼
//!     {state, body} JSON                    *.html       SQLite
//!            │
//!            ▼
//!     client navigator (transport → render → view → history)
//! ```
//!
//! Cross-cutting: `config`, `observability`, `lifecycle`.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod store;

pub use config::SiteConfig;
pub use error::{SiteError, SiteResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use model::Model;
