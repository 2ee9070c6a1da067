//! HTTP layers wrapped around every route: CORS and request tracing.
//!
//! The explore API is read-only, so CORS only admits `GET`, `POST` (explore
//! bodies) and preflight `OPTIONS`.

use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

use crate::config::CorsConfig;

/// Trace layer type produced by [`tracing_layer`].
pub type HttpTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>>;

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OriginPolicy {
    /// No origins configured, or `*` among them
    Any,
    Listed(Vec<HeaderValue>),
}

impl OriginPolicy {
    fn from_config(config: &CorsConfig) -> Self {
        if config.allowed_origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*") {
            return Self::Any;
        }

        let origins = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                },
            })
            .collect();
        Self::Listed(origins)
    }
}

/// Build the CORS layer for the configured origins.
///
/// Credentials are only enabled for an explicit origin list; a wildcard
/// origin never carries them.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    match OriginPolicy::from_config(config) {
        OriginPolicy::Any => cors.allow_origin(Any),
        OriginPolicy::Listed(origins) => cors
            .allow_origin(origins)
            .allow_credentials(config.allow_credentials),
    }
}

/// Request spans at `INFO`, 5xx responses logged at `ERROR`.
pub fn tracing_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
