use crate::db::ArticleRepository;
use crate::server::routes::{articles, home::home_page, openapi::openapi_document};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use base64::Engine as _;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::normalize_path::NormalizePath;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Shared handler state. Holds no articles itself; all state lives behind the repository.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ArticleRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ArticleRepository>) -> Self {
        Self { repo }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Logs one line per request. `route` is the matched template (`/articles/{id}`), so
/// lines for different article ids group together; unmatched paths log as `-`.
async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let version = req.version();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "-".to_string(), |m| m.as_str().to_string());

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let start = Instant::now();
    let mut resp = next.run(req).await;
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status().as_u16();
    match resp.status() {
        s if s.is_server_error() => error!(
            status, %request_id, %method, ?version, %route, %path, latency_ms,
            "Request failed"
        ),
        s if s.is_client_error() => warn!(
            status, %request_id, %method, ?version, %route, %path, latency_ms,
            "Request rejected"
        ),
        _ => info!(
            status, %request_id, %method, ?version, %route, %path, latency_ms,
            "Request served"
        ),
    }

    resp
}

/// Route table without path normalization.
pub fn article_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/openapi.json", get(openapi_document))
        .merge(articles::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}

/// The served application: `article_router` behind trailing-slash trimming, so
/// `/articles/` and `/articles` reach the same handler.
///
/// Normalization has to wrap the router (not be a route layer) to run before matching.
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(article_router(state))
}
