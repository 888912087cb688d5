//! Router, shared state, and handlers for the blueprint API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use protoai_core::{assemble_blueprint, create_design_prompt, Generator};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::error::ApiError;

pub struct AppState {
    pub generator: Arc<dyn Generator>,
    pub max_idea_chars: usize,
}

#[derive(Serialize)]
struct GenerateResponse {
    success: bool,
    blueprint: Value,
    ai_response: String,
}

pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/generate", post(generate_blueprint))
        .with_state(Arc::new(state))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(allowed_origins))
        .layer(axum::middleware::from_fn(log_requests))
}

/// Listed origins only, any method and header, credentials allowed. Methods and headers
/// are mirrored from the preflight because `*` is not valid alongside credentials.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "[PROTOAI] ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// A panicking handler becomes the same opaque 500 as any other internal failure.
fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let cause = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    ApiError::Internal(cause).into_response()
}

async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        %peer,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "[PROTOAI] request"
    );
    response
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "ProtoAI Backend is running!" }))
}

async fn health() -> &'static str {
    "OK"
}

/// POST /generate: validate the idea, call the generator once, assemble the blueprint.
/// Generation failures never fail the request; they only leave `ai_response` empty.
async fn generate_blueprint(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let idea = parse_idea(&body)?;
    let idea = idea.as_deref().map(str::trim).unwrap_or_default();
    if idea.is_empty() {
        return Err(ApiError::IdeaRequired);
    }
    if idea.chars().count() > state.max_idea_chars {
        return Err(ApiError::IdeaTooLong(state.max_idea_chars));
    }

    let prompt = create_design_prompt(idea);
    let ai_response = state.generator.generate(&prompt).await;
    let blueprint = assemble_blueprint(idea, &ai_response);

    tracing::info!(
        title = %blueprint.title,
        generated = !ai_response.is_empty(),
        "[PROTOAI] blueprint assembled"
    );

    let blueprint = serde_json::to_value(&blueprint).map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(GenerateResponse {
        success: true,
        blueprint,
        ai_response,
    }))
}

/// The body must be a JSON object; `idea` may be absent or null but otherwise must be a string.
fn parse_idea(body: &[u8]) -> Result<Option<String>, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "[PROTOAI] rejected request body");
        ApiError::InvalidBody
    })?;
    let fields = value.as_object().ok_or_else(|| {
        tracing::debug!("[PROTOAI] rejected request body: not a JSON object");
        ApiError::InvalidBody
    })?;

    match fields.get("idea") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(idea)) => Ok(Some(idea.clone())),
        Some(_) => Err(ApiError::InvalidBody),
    }
}
