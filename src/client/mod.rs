//! Headless site client.
//!
//! # Data Flow
//! ```text
//! User action / history pop
//!     → navigator.rs (state transition)
//!     → transport.rs (GET /request → Envelope)
//!     → render.rs (markup + click bindings)
//!     → view.rs (content regions)
//!     → history.rs (address bar push)
//! ```
//!
//! # Design Decisions
//! - Transport, view and history are traits so the navigator runs against a
//!   live server or entirely in memory
//! - Only page, filter and page number live in the address bar

pub mod address;
pub mod history;
pub mod navigator;
pub mod render;
pub mod transport;
pub mod view;

pub use address::Address;
pub use history::{History, SessionHistory};
pub use navigator::{Navigator, Phase, PopOutcome};
pub use transport::{HttpTransport, Transport, TransportError};
pub use view::{MemoryView, Region, View};
