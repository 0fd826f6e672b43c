//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the action endpoint, health check and static assets
//! - Wire up middleware (tracing, request ID, timeout)
//! - Run the dispatch chain on the blocking pool and present the outcome
//! - Bind server to listener with graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppMode, SiteConfig};
use crate::dispatch::Chain;
use crate::http::request::{MakeRequestUuid, SiteRequest, X_REQUEST_ID};
use crate::http::response::{present, Envelope};
use crate::model::Model;
use crate::observability::metrics;

/// Path of the action endpoint.
pub const REQUEST_PATH: &str = "/request";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<Chain>,
    pub model: Arc<Model>,
    pub mode: AppMode,
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    config: SiteConfig,
}

impl HttpServer {
    /// Create a new HTTP server over `model` with the standard chain.
    pub fn new(config: SiteConfig, model: Model) -> Self {
        let state = AppState {
            chain: Arc::new(Chain::standard()),
            model: Arc::new(model),
            mode: config.site.mode,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route(REQUEST_PATH, get(request_handler))
            .route("/healthz", get(|| async { "ok\n" }))
            .with_state(state);

        if let Some(public_dir) = config.site.public_dir.as_deref().filter(|d| d.is_dir()) {
            tracing::info!(dir = %public_dir.display(), "serving static assets");
            router = router.fallback_service(ServeDir::new(public_dir));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    let request_id = req
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");
                    tracing::info_span!(
                        "request",
                        request_id = %request_id,
                        method = %req.method(),
                        uri = %req.uri(),
                    )
                }))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        )
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            site = %self.config.site.name,
            mode = ?self.config.site.mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

/// The single action endpoint: decode, dispatch, present.
async fn request_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let start = Instant::now();
    let request = SiteRequest::from_query(query.as_deref().unwrap_or_default());
    let action = request.action_label().to_string();

    let envelope = match tokio::task::spawn_blocking(move || {
        let outcome = state.chain.dispatch(&request, &state.model);
        present(outcome, &request, state.mode)
    })
    .await
    {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!(action = %action, error = %e, "dispatch task failed");
            return internal_error();
        }
    };
    metrics::record_request(&action, envelope.state, start);
    json_response(&envelope)
}

fn json_response(envelope: &Envelope) -> Response {
    match envelope.to_json() {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize envelope");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
}
