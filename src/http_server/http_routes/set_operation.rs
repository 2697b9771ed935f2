use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderMap, header::AUTHORIZATION},
};
use serde::Deserialize;

use crate::http_server::{error::ApiError, state::AppState};
use crate::services::playlist_algebra::{
    NewPlaylistSummary, SetAlgebraError, SetAlgebraService, SetOperation, SetOperationRequest,
};

#[derive(Debug, Deserialize)]
pub struct SetOperationQuery {
    #[serde(alias = "firstPlaylist")]
    pub first: Option<String>,
    #[serde(alias = "secondPlaylist")]
    pub second: Option<String>,
    pub name: Option<String>,
    pub owner: Option<String>,
}

fn required(value: Option<String>, parameter: &'static str) -> Result<String, ApiError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::MissingParameter(parameter))
}

/// Drops a leading `Bearer` scheme, in any case.
fn strip_bearer_scheme(value: &str) -> &str {
    let value = value.trim();
    match value.split_once(char::is_whitespace) {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        None if value.eq_ignore_ascii_case("bearer") => "",
        _ => value,
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(strip_bearer_scheme)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .ok_or(ApiError::MissingToken)
}

/// `GET /{operation}?first=..&second=..[&name=..][&owner=..]`
pub async fn set_operation(
    State(app_state): State<Arc<AppState>>,
    Path(operation): Path<String>,
    query: Result<Query<SetOperationQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Json<NewPlaylistSummary>, ApiError> {
    let operation: SetOperation = operation.parse()?;
    let token = bearer_token(&headers)?;
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let request = SetOperationRequest {
        token,
        first_playlist: required(query.first, "first")?,
        second_playlist: required(query.second, "second")?,
        operation,
        name: query.name,
        owner: query.owner,
    };

    let provider = app_state
        .providers
        .connect()
        .map_err(SetAlgebraError::from)?;
    let summary = SetAlgebraService::new(provider).run(&request).await?;

    Ok(Json(summary))
}
