//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! GET /request?action=...
//!     → server.rs (Axum setup, request ID, timeout)
//!     → request.rs (decode query into a SiteRequest)
//!     → dispatch chain (blocking pool)
//!     → response.rs (Envelope with state + body)
//!     → JSON to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{Action, SiteRequest, X_REQUEST_ID};
pub use response::Envelope;
pub use server::HttpServer;
