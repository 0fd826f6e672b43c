//! Getting envelopes from the action endpoint.

use std::future::Future;

use thiserror::Error;

use crate::http::request::SiteRequest;
use crate::http::response::Envelope;
use crate::http::server::REQUEST_PATH;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The request timed out or was cancelled before it completed. Not worth a log line.
    #[error("request aborted")]
    Aborted,

    #[error("request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("endpoint answered HTTP {0}")]
    Status(u16),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Aborted
        } else {
            TransportError::Http(err)
        }
    }
}

impl TransportError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, TransportError::Aborted)
    }
}

/// One GET against the action endpoint.
pub trait Transport {
    fn fetch(
        &self,
        request: &SiteRequest,
    ) -> impl Future<Output = Result<Envelope, TransportError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), REQUEST_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, request: &SiteRequest) -> Result<Envelope, TransportError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&request.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(response.json::<Envelope>().await?)
    }
}
