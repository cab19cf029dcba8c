//! API handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::menu::{MenuEntry, ScrapedMenu};
use crate::Error;

/// Health check
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.menu.source_name().to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub source: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    /// Weekday code; today's weekday when absent
    pub day: Option<String>,
}

/// Menu for the requested (or current) weekday
pub async fn get_menu(
    State(state): State<AppState>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<MenuEntry>, ApiError> {
    let Query(params) = query?;
    let entry = state.menu.lookup(params.day.as_deref()).await?;
    Ok(Json(entry))
}

/// Scrape-backed menu lookup
pub async fn scrape_menu(
    State(state): State<AppState>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<ScrapedMenu>, ApiError> {
    let Query(params) = query?;
    let scraped = state.menu.scrape(params.day.as_deref()).await?;
    Ok(Json(scraped))
}

/// Error body: `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Handler error carrying the HTTP status to report
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::MenuNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %err, "Request failed");
        } else {
            tracing::debug!(error = %err, "Request rejected");
        }

        Self::new(status, err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected query string");
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
