//! HTTP request handlers.

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::negotiate::Format;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kvconf_core::{
    ConfigObject, ConfigObjectList, ConfigService, DeleteAck, ErrorReply, PageQuery,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Configuration operations over the shared store.
    pub service: ConfigService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates handler state.
    pub fn new(service: ConfigService, config: Arc<ServerConfig>) -> Self {
        Self { service, config }
    }
}

/// `POST /config`
pub async fn create_config(
    State(state): State<AppState>,
    payload: Result<Json<ConfigObject>, JsonRejection>,
) -> Result<Json<ConfigObject>, ApiError> {
    let Json(object) = payload?;
    Ok(Json(state.service.create(object).await?))
}

/// `GET /config`
pub async fn list_config(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ConfigObjectList>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.service.list(&query).await?))
}

/// `GET /config/{key}`
///
/// Answers with the raw value when the client prefers `text/plain`.
pub async fn get_config(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let object = state.service.get(&key).await?;
    let cache = [(header::CACHE_CONTROL, state.config.cache_control())];

    Ok(match Format::from_headers(&headers) {
        Format::PlainText => (cache, object.value).into_response(),
        Format::Json => (cache, Json(object)).into_response(),
    })
}

/// `DELETE /config/{key}`
pub async fn delete_config(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    Ok(Json(state.service.delete(&key).await?))
}

/// `GET /api`
pub async fn hello(State(state): State<AppState>) -> String {
    format!("Hello, world! I am {}", state.config.title)
}

/// `GET /livez`
pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Body of a successful readiness probe.
#[derive(Debug, Serialize)]
pub struct ReadyzResponse {
    /// Always `"ok"`.
    pub status: &'static str,
}

/// `GET /readyz`
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.service.ping().await {
        Ok(()) => Json(ReadyzResponse { status: "ok" }).into_response(),
        Err(e) => {
            warn!(error = %e, "Store not ready");
            (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorReply::from(&e))).into_response()
        }
    }
}
