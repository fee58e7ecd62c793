//! HTTP transport
//!
//! One endpoint, `POST /`, takes a single JSON log record per request. The
//! body is decoded and handed to the configured [`Appender`]; the response is
//! an empty `204 No Content` on success or an empty `400 Bad Request` when
//! the body is not a JSON object.

use crate::config::ServerConfig;
use crate::core::{Appender, ConsoleError, Decoder, Result};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// How one request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl Outcome {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Outcome::Accepted => StatusCode::NO_CONTENT,
            Outcome::Rejected => StatusCode::BAD_REQUEST,
        }
    }
}

/// Shared request handling state
#[derive(Clone)]
pub struct Ingest {
    decoder: Decoder,
    appender: Arc<dyn Appender>,
}

impl Ingest {
    pub fn new(appender: Arc<dyn Appender>) -> Self {
        Self::with_decoder(Decoder::new(), appender)
    }

    pub fn with_decoder(decoder: Decoder, appender: Arc<dyn Appender>) -> Self {
        Self { decoder, appender }
    }

    /// Decode one body and append it. Only a malformed payload is rejected.
    pub fn handle(&self, body: &[u8]) -> Outcome {
        match self.decoder.decode(body) {
            Ok(record) => {
                self.appender.append(&record);
                Outcome::Accepted
            }
            Err(err) => {
                tracing::debug!(error = %err, bytes = body.len(), "rejected payload");
                Outcome::Rejected
            }
        }
    }
}

async fn ingest(State(ingest): State<Ingest>, body: Bytes) -> StatusCode {
    ingest.handle(&body).status_code()
}

/// Build the router serving the ingest endpoint
pub fn build_router(appender: Arc<dyn Appender>) -> Router {
    router_with(Ingest::new(appender))
}

/// Bodies of any size are read; a record is only ever accepted or rejected.
pub fn router_with(ingest_state: Ingest) -> Router {
    Router::new()
        .route("/", post(ingest))
        .layer(DefaultBodyLimit::disable())
        .with_state(ingest_state)
}

/// Bind the configured address
///
/// # Errors
///
/// Returns [`ConsoleError::IoOperation`] when the address cannot be bound.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.socket_addr();
    TcpListener::bind(addr)
        .await
        .map_err(|err| ConsoleError::io_operation("binding listener", addr.to_string(), err))
}

/// Serve requests on `listener` until `shutdown` completes
///
/// # Errors
///
/// Returns [`ConsoleError::IoOperation`] when the server stops with an IO error.
pub async fn serve<F>(listener: TcpListener, appender: Arc<dyn Appender>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|err| ConsoleError::io_operation("reading listener address", "listener", err))?;
    tracing::info!("running on port {}", addr.port());
    tracing::debug!(%addr, appender = appender.name(), "listening");

    axum::serve(listener, build_router(appender))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|err| ConsoleError::io_operation("serving requests", addr.to_string(), err))
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
