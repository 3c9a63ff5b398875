mod reviews;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

use proofstudio_gemini::GeminiClient;

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    /// `None` when `GEMINI_API_KEY` is absent; the generate endpoint then
    /// answers with a configuration error and never calls out.
    pub gemini: Option<Arc<GeminiClient>>,
}

/// Wire shape for every failure: `{ "error": "..." }`, mutually exclusive
/// with the success payload.
#[derive(Debug, Serialize)]
pub struct ErrorResult {
    pub error: String,
}

/// A user-facing error with its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorResult {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    gemini: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/generate-reviews", post(reviews::generate_reviews))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                // Responses are generated fresh per request; make sure no
                // intermediary serves a stale review page.
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-cache, no-store, must-revalidate"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::PRAGMA,
                    HeaderValue::from_static("no-cache"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::EXPIRES,
                    HeaderValue::from_static("0"),
                )),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let gemini = if state.gemini.is_some() {
        "configured"
    } else {
        "unconfigured"
    };
    (StatusCode::OK, Json(HealthData { status: "ok", gemini }))
}
