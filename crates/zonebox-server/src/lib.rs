use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;
use zonebox_core::InterpretRequest;
use zonebox_interpret::{InterpretError, Interpreter};

const INVALID_BODY: &str = "Invalid JSON body";
const INVALID_TEXT: &str = "Field 'text' must be a non-empty string";

#[derive(Clone)]
pub struct AppState {
    interpreter: Arc<Interpreter>,
}

impl AppState {
    pub fn new(interpreter: Interpreter) -> Self {
        Self {
            interpreter: Arc::new(interpreter),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/interpret", post(interpret))
        .route("/api/command-schema", get(command_schema))
        .layer(middleware::from_fn(request_span))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn request_span(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %method, route = %route);

    async move {
        let response = next.run(request).await;
        tracing::info!(status = response.status().as_u16(), "request finished");
        response
    }
    .instrument(span)
    .await
}

#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<InterpretError> for ApiError {
    fn from(err: InterpretError) -> Self {
        match err {
            InterpretError::InvalidInput => ApiError::bad_request(INVALID_TEXT),
            InterpretError::Misconfigured { .. } => {
                tracing::error!(error = %err, "interpret endpoint is not configured");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            InterpretError::UpstreamEmpty => {
                tracing::warn!("provider returned no content");
                ApiError::new(StatusCode::BAD_GATEWAY, "Empty response from provider")
            }
            InterpretError::UpstreamUnparseable(ref source) => {
                tracing::warn!(error = %source, "provider returned invalid JSON");
                ApiError::new(StatusCode::BAD_GATEWAY, "Unable to parse provider response")
            }
            InterpretError::UpstreamError(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to interpret command",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn command_schema() -> Json<Value> {
    Json(zonebox_core::command_schema())
}

async fn interpret(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
    // Credential first: a misconfigured server answers 500 whatever the body.
    state.interpreter.ensure_configured()?;

    let body: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request(INVALID_BODY))?;
    // `null` carries no fields at all, so it is not a request body.
    if body.is_null() {
        return Err(ApiError::bad_request(INVALID_BODY));
    }
    let request =
        InterpretRequest::from_body(&body).ok_or_else(|| ApiError::bad_request(INVALID_TEXT))?;

    let command = state.interpreter.interpret(&request.text).await?;
    Ok(Json(command))
}
