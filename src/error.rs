//! Error taxonomy for the data layer and dispatch chain.
//!
//! Every variant collapses to the same client-visible "no content" envelope;
//! the distinction only matters for logging and diagnostic-mode bodies.
//! A request that no handler claims is not an error, see
//! [`crate::dispatch::Dispatch::Unhandled`].

use thiserror::Error;

/// Errors raised while serving a request.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Caller data outside a whitelist, over a length limit or out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The named document does not exist or cannot be read.
    #[error("Handling of HTML document {0} failed!")]
    DocumentNotFound(String),

    /// The document exists but lacks a required element.
    #[error("Handling of HTML document {document} failed! (missing element #{element})")]
    DocumentStructureInvalid { document: String, element: String },

    /// Query execution or connectivity failure.
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// The connection lock was poisoned by a panicking request.
    #[error("store unavailable")]
    StoreUnavailable,

    /// A value without a JSON representation reached the presenter.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SiteError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Internal failures are logged at error level; the rest are caller or content problems.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Store(_) | Self::StoreUnavailable | Self::Serialization(_)
        )
    }
}

/// Result type for data-layer operations.
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SiteError::DocumentNotFound("about.html".into());
        assert_eq!(err.to_string(), "Handling of HTML document about.html failed!");

        let err = SiteError::DocumentStructureInvalid {
            document: "post".into(),
            element: "intro".into(),
        };
        assert!(err.to_string().contains("#intro"));
    }

    #[test]
    fn test_internal_classification() {
        assert!(SiteError::StoreUnavailable.is_internal());
        assert!(!SiteError::invalid("page-number").is_internal());
        assert!(!SiteError::DocumentNotFound("x".into()).is_internal());
    }
}
