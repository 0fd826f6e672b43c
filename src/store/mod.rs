//! Storage subsystem.
//!
//! # Data Flow
//! ```text
//! Model (facade)
//!     → documents.rs (HTML fragments on disk, title/intro extraction)
//!     → records.rs (SQLite: categories, paginated article listings)
//!
//! Both stores validate names through sanitize.rs before use.
//! catalog.rs feeds records.rs from a TOML description (seed command).
//! ```
//!
//! # Design Decisions
//! - Stores are plain values built at startup and owned by the Model
//! - No caching across requests besides prepared statements
//! - Whitelisting is a gate, never a rewrite

pub mod catalog;
pub mod documents;
pub mod records;
pub mod sanitize;

pub use documents::DocumentStore;
pub use records::RecordStore;
