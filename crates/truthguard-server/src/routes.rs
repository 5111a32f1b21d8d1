//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Instrument};
use truthguard_core::{Error, InferenceResult};
use url::Url;
use uuid::Uuid;

use crate::config::CorsConfig;
use crate::state::AppState;

pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/scrape", post(scrape))
        .route("/predict", post(predict))
        .fallback(fallback)
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allow_any_origin {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    metrics::counter!("truthguard_requests_total", "endpoint" => "scrape").increment(1);
    let Json(req) = payload?;
    let url = parse_url(&req.url)?;

    let span = tracing::info_span!("scrape", request_id = %Uuid::new_v4());
    async move {
        info!("Scrape request for {}", url);
        let text = state.service.scrape(&url).await?;
        Ok::<_, ApiError>(Json(ScrapeResponse { text }))
    }
    .instrument(span)
    .await
}

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<InferenceResult>, ApiError> {
    metrics::counter!("truthguard_requests_total", "endpoint" => "predict").increment(1);
    let Json(req) = payload?;
    let url = req.url.as_deref().map(parse_url).transpose()?;

    let span = tracing::info_span!("predict", request_id = %Uuid::new_v4());
    async move {
        info!(
            "Predict request (text: {}, url: {})",
            req.text.is_some(),
            url.is_some()
        );
        let result = state.service.predict(req.text, url).await?;
        Ok::<_, ApiError>(Json(result))
    }
    .instrument(span)
    .await
}

/// Accept absolute http(s) URLs only
fn parse_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw)
        .map_err(|e| ApiError::Validation(format!("Invalid URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" if url.host().is_some() => Ok(url),
        _ => Err(ApiError::Validation(format!(
            "URL must use http or https: {}",
            raw
        ))),
    }
}

async fn fallback() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}

/// Error handling
#[derive(Debug)]
pub enum ApiError {
    /// Request body or fields failed validation
    Validation(String),
    /// Body refused before decoding (size limit, content type)
    Rejected(StatusCode, String),
    /// Pipeline failure
    Service(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(rejection.body_text())
            }
            status => ApiError::Rejected(status, rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, detail) = match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg),
            ApiError::Rejected(status, msg) => (status, "rejected", msg),
            ApiError::Service(err) => {
                let status = if err.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else if matches!(err, Error::UpstreamFetch(_)) {
                    StatusCode::BAD_GATEWAY
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, err.kind(), err.to_string())
            }
        };

        metrics::counter!("truthguard_errors_total", "kind" => kind).increment(1);
        if status.is_server_error() {
            warn!("Request failed ({}): {}", status, detail);
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://example.com/article").is_ok());
        assert!(parse_url("http://localhost:8080/news").is_ok());
        assert!(matches!(
            parse_url("ftp://example.com/file"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(parse_url("not a url"), Err(ApiError::Validation(_))));
        assert!(matches!(
            parse_url("file:///etc/passwd"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (Error::invalid_input("empty"), StatusCode::BAD_REQUEST),
            (Error::tokenization("bad"), StatusCode::BAD_REQUEST),
            (Error::upstream_fetch("timeout"), StatusCode::BAD_GATEWAY),
            (Error::inference("shape"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), expected);
        }
    }
}
