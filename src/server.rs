use std::any::Any;

use axum::{
    Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::bookmarks;
use crate::error::ConfigError;
use crate::handler::{AppState, healthcheck, ping};

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

fn allowed_headers() -> [HeaderName; 9] {
    [
        header::CONTENT_TYPE,
        header::CONTENT_LENGTH,
        header::ACCEPT_ENCODING,
        HeaderName::from_static("x-csrf-token"),
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ORIGIN,
        header::CACHE_CONTROL,
        HeaderName::from_static("x-requested-with"),
    ]
}

/// Builds the CORS layer from the configured allow-list: `*` for any origin,
/// otherwise a comma separated list of exact origins.
pub fn cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    let cors = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(allowed_headers());

    if allowed_origins.trim() == "*" {
        return Ok(cors.allow_origin(AllowOrigin::any()));
    }

    let origins = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| ConfigError::Invalid(format!("bad CORS origin {:?}: {}", o, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::Invalid("no CORS origins configured".to_string()));
    }

    // Credentials cannot be combined with a wildcard origin.
    Ok(cors
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}

/// Answers every OPTIONS request with an empty 204.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_preflight = req.method() == Method::OPTIONS;
    let mut res = next.run(req).await;
    if is_preflight && res.status().is_success() {
        *res.status_mut() = StatusCode::NO_CONTENT;
    }
    res
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "request handler panicked");
    crate::server_error()
}

pub fn build_router(state: AppState, allowed_origins: &str) -> Result<Router, ConfigError> {
    let cors = cors_layer(allowed_origins)?;

    let api = Router::new()
        .route("/ping", get(ping))
        .nest("/bookmarks", bookmarks::routes());

    let app = Router::new()
        .route("/health", get(healthcheck))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(app)
}
