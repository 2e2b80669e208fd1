//! HTTP request handlers for the proxy service.
//!
//! Two GET-only endpoints hide the Places credentials and the image host from
//! the browser: `/api/google-places` forwards place-details lookups with the
//! API key attached, `/api/google-images` relays avatar bytes with permissive
//! CORS and long-lived caching.

use axum::{
    extract::{Query, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE, USER_AGENT,
        },
        StatusCode,
    },
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

/// Fields requested from the place-details API
pub const PLACE_FIELDS: &str = "name,rating,reviews";

/// User agent sent to the image host
pub const IMAGE_USER_AGENT: &str = "Mozilla/5.0 (compatible)";

/// Cache policy for relayed images
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=31536000";

const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Outbound HTTP client
    pub http: reqwest::Client,
    /// Places API key, if configured
    pub api_key: Option<Arc<str>>,
    /// Base URL of the Places API
    pub places_base_url: Arc<str>,
}

impl AppState {
    /// Build state from a resolved key and upstream base URL
    pub fn new(api_key: Option<String>, places_base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, places_base_url)
    }

    /// Build state around an existing HTTP client
    pub fn with_client(
        http: reqwest::Client,
        api_key: Option<String>,
        places_base_url: &str,
    ) -> Self {
        Self {
            http,
            api_key: api_key.map(Arc::from),
            places_base_url: Arc::from(places_base_url.trim_end_matches('/')),
        }
    }
}

/// `GET /api/google-places` query
#[derive(Debug, Deserialize)]
pub struct PlacesParams {
    /// Place identifier
    pub place_id: Option<String>,
}

/// `GET /api/google-images` query
#[derive(Debug, Deserialize)]
pub struct ImageParams {
    /// Image URL (percent-decoded by the extractor)
    pub url: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" when the process answers
    pub status: String,
    /// Whether a Places API key is available
    pub api_key_configured: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Endpoint called with something other than GET
    MethodNotAllowed,
    /// Required query parameter missing or empty
    MissingParameter(&'static str),
    /// No Places API key available
    ApiKeyMissing,
    /// Upstream request failed
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            AppError::MissingParameter(name) => {
                (StatusCode::BAD_REQUEST, format!("{} parameter is required", name))
            }
            AppError::ApiKeyMissing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API key not configured".to_string(),
            ),
            AppError::Upstream(msg) => {
                let body = Json(ErrorResponse { error: msg });
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
                    body,
                )
                    .into_response();
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

fn upstream_error(e: reqwest::Error) -> AppError {
    // Drop the URL: for place lookups it carries the API key.
    AppError::Upstream(e.without_url().to_string())
}

/// GET /api/google-places - Forward a place-details lookup
async fn google_places(
    State(state): State<AppState>,
    Query(params): Query<PlacesParams>,
) -> Result<Response, AppError> {
    let api_key = state.api_key.as_deref().ok_or(AppError::ApiKeyMissing)?;
    let place_id = params
        .place_id
        .filter(|id| !id.is_empty())
        .ok_or(AppError::MissingParameter("place_id"))?;

    debug!("Looking up place {}", place_id);
    let url = format!("{}/maps/api/place/details/json", state.places_base_url);

    let result: Result<serde_json::Value, AppError> = async {
        let response = state
            .http
            .get(&url)
            .query(&[
                ("place_id", place_id.as_str()),
                ("fields", PLACE_FIELDS),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(upstream_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Google API error: {}",
                status.as_u16()
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(upstream_error)
    }
    .await;

    let data = result.inspect_err(|e| error!("Error fetching Google Places data: {:?}", e))?;

    Ok((
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (ACCESS_CONTROL_ALLOW_METHODS, "GET"),
        ],
        Json(data),
    )
        .into_response())
}

/// GET /api/google-images - Relay an avatar image
async fn google_images(
    State(state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Result<Response, AppError> {
    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or(AppError::MissingParameter("url"))?;

    let result: Result<(String, axum::body::Bytes), AppError> = async {
        let response = state
            .http
            .get(&url)
            .header(USER_AGENT, IMAGE_USER_AGENT)
            .send()
            .await
            .map_err(upstream_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Failed to fetch image: {}",
                status.as_u16()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await.map_err(upstream_error)?;
        Ok((content_type, bytes))
    }
    .await;

    let (content_type, bytes) =
        result.inspect_err(|e| error!("Error fetching Google image: {:?}", e))?;

    Ok((
        [
            (CONTENT_TYPE, content_type),
            (CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
        ],
        bytes,
    )
        .into_response())
}

/// GET /health - Liveness and key presence
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        api_key_configured: state.api_key.is_some(),
    })
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route(
            "/api/google-places",
            get(google_places).fallback(method_not_allowed),
        )
        .route(
            "/api/google-images",
            get(google_images).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .with_state(state)
}
