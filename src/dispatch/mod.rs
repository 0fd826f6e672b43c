//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! SiteRequest (action, page, filter, page-number)
//!     → chain.rs (first claiming handler wins)
//!     → handlers.rs (Categories | Page | BlogEntries)
//!     → Model
//!     → Return: Handled(json) | Unhandled | SiteError
//! ```
//!
//! # Design Decisions
//! - Chain built at startup, immutable at runtime
//! - Handlers claim disjoint action tags, so order is for readability only
//! - "Nobody claimed it" is an outcome, not an error

pub mod chain;
pub mod handlers;

pub use chain::{Chain, Dispatch};
pub use handlers::Handler;
