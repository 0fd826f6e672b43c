//! Whitelist validation for strings that reach a query or a file path.
//!
//! # Responsibilities
//! - Reject strings at or above a per-use maximum length
//! - Reject strings containing any character outside a per-use whitelist
//!
//! # Design Decisions
//! - Validation gate only: nothing is escaped or rewritten
//! - Query values are still bound as parameters; this is defense in depth
//! - `None` passes through where the caller allows "no value"

use crate::error::{SiteError, SiteResult};

/// The two whitelists in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Query fragments: `[A-Za-z0-9,?()\- ]`, shorter than 256 characters.
    QueryFragment,
    /// File names: `[A-Za-z0-9.\-]`, shorter than 128 characters.
    FileName,
}

impl Charset {
    pub fn max_len(self) -> usize {
        match self {
            Charset::QueryFragment => 256,
            Charset::FileName => 128,
        }
    }

    pub fn allows(self, c: char) -> bool {
        if c.is_ascii_alphanumeric() || c == '-' {
            return true;
        }
        match self {
            Charset::QueryFragment => matches!(c, ',' | '?' | '(' | ')' | ' '),
            Charset::FileName => c == '.',
        }
    }

    fn label(self) -> &'static str {
        match self {
            Charset::QueryFragment => "query fragment",
            Charset::FileName => "file name",
        }
    }
}

/// Validate a required string against `charset`.
pub fn sanitize(input: &str, charset: Charset) -> SiteResult<&str> {
    if input.len() >= charset.max_len() {
        return Err(SiteError::invalid(format!(
            "{} longer than {} characters",
            charset.label(),
            charset.max_len() - 1
        )));
    }
    if let Some(bad) = input.chars().find(|c| !charset.allows(*c)) {
        return Err(SiteError::invalid(format!(
            "{} contains disallowed character {bad:?}",
            charset.label()
        )));
    }
    Ok(input)
}

/// Validate an optional string; `None` means "no value" and is accepted.
pub fn sanitize_opt(input: Option<&str>, charset: Charset) -> SiteResult<Option<&str>> {
    input.map(|s| sanitize(s, charset)).transpose()
}
