//! Response envelope and presentation.
//!
//! # Responsibilities
//! - Wrap a dispatch outcome in a `{state, body}` envelope
//! - Serialize the envelope to JSON
//!
//! # Design Decisions
//! - Every failure (unhandled, caller error, store error) maps to state 204
//! - Error detail reaches the body only in diagnostic mode
//! - The envelope type is shared with the client, which decodes it

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::schema::AppMode;
use crate::dispatch::Dispatch;
use crate::error::{SiteError, SiteResult};
use crate::http::request::SiteRequest;

/// Success with a body.
pub const STATE_OK: u16 = 200;
/// No body: empty result or any failure.
pub const STATE_NO_CONTENT: u16 = 204;

/// The JSON envelope every action answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub state: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Envelope {
    pub fn ok(body: Value) -> Self {
        Self {
            state: STATE_OK,
            body: Some(body),
        }
    }

    pub fn no_content(detail: Option<String>) -> Self {
        Self {
            state: STATE_NO_CONTENT,
            body: detail.map(Value::String),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.state == STATE_OK
    }

    pub fn to_json(&self) -> SiteResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Map a dispatch outcome to its envelope.
pub fn present(outcome: SiteResult<Dispatch>, request: &SiteRequest, mode: AppMode) -> Envelope {
    match outcome {
        Ok(Dispatch::Handled(value)) => Envelope::ok(value),
        Ok(Dispatch::Unhandled) => {
            tracing::warn!(request = %request, "request left the chain unhandled");
            let detail = mode.is_diagnostic().then(|| {
                format!("The chain was unable to handle a task.\nContents of GET:\n{request}")
            });
            Envelope::no_content(detail)
        }
        Err(err) => {
            log_failure(&err, request);
            Envelope::no_content(mode.is_diagnostic().then(|| err.to_string()))
        }
    }
}

fn log_failure(err: &SiteError, request: &SiteRequest) {
    if err.is_internal() {
        tracing::error!(request = %request, error = %err, "request failed");
    } else {
        tracing::warn!(request = %request, error = %err, "request rejected");
    }
}
