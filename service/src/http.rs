//! HTTP server for the prospect pipeline.
//!
//! Each request runs the whole pipeline to completion under an overall
//! timeout. Requests share nothing but the pipeline handle, so concurrent
//! callers proceed independently.

use std::error::Error as StdError;
use std::time::Duration;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use prospect_core::{ErrorCategory, GenerateRequest, ProspectError, ProspectPipeline};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use crate::SERVICE_VERSION;
use crate::protocol::{ErrorBody, HealthResult, INVALID_BODY_PREFIX, TIMEOUT_MESSAGE, status_for};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pipeline: ProspectPipeline,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(pipeline: ProspectPipeline, request_timeout: Duration) -> Self {
        Self {
            pipeline,
            request_timeout,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve on `listener` until `shutdown` flips to `true`.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Prospect service listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            // A dropped sender also ends the wait.
            let _ = shutdown.wait_for(|stop| *stop).await;
            tracing::info!("Shutdown requested, draining connections");
        })
        .await
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), "Rejected generate body: {}", rejection.body_text());
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("{INVALID_BODY_PREFIX}: {}", rejection.body_text()),
            );
        }
    };

    match tokio::time::timeout(state.request_timeout, state.pipeline.generate(&request)).await {
        Ok(Ok(summary)) => Json(summary).into_response(),
        Ok(Err(err)) => pipeline_error_response(&err),
        Err(_) => {
            tracing::error!(
                timeout_secs = state.request_timeout.as_secs_f64(),
                "Generate request timed out"
            );
            error_response(StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE)
        }
    }
}

async fn healthz() -> Json<HealthResult> {
    Json(HealthResult {
        status: "ok".to_string(),
        version: SERVICE_VERSION.to_string(),
    })
}

fn pipeline_error_response(err: &ProspectError) -> Response {
    let category = err.category();
    match category {
        ErrorCategory::BadInput | ErrorCategory::NoResults => {
            tracing::info!(category = category.as_str(), "{err}");
        }
        ErrorCategory::Internal => {
            tracing::error!(category = category.as_str(), "Generate failed: {}", error_chain(err));
        }
    }
    error_response(status_for(category), err.to_string())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// `err: cause: cause...` for logging. A cause whose text the chain already
/// ends with is not repeated.
fn error_chain(err: &dyn StdError) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !chain.ends_with(&text) {
            chain.push_str(": ");
            chain.push_str(&text);
        }
        source = cause.source();
    }
    chain
}
