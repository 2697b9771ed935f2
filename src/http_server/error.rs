use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::services::playlist_algebra::{SetAlgebraError, set_ops::UnknownOperation};

/// Wire shape of every error response: `{"error": {"message", "status"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: NestedError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedError {
    pub message: String,
    pub status: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    SetAlgebra(#[from] SetAlgebraError),
    #[error(transparent)]
    UnknownOperation(#[from] UnknownOperation),
    #[error("No token provided")]
    MissingToken,
    #[error("Missing required query parameter `{0}`")]
    MissingParameter(&'static str),
    #[error("Invalid query: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SetAlgebra(error) => {
                StatusCode::from_u16(error.status()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::UnknownOperation(_) => StatusCode::NOT_FOUND,
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::MissingParameter(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: NestedError {
                message: self.to_string(),
                status: self.status().as_u16(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status, self);
        } else {
            tracing::warn!("Request rejected with {}: {}", status, self);
        }

        (status, Json(self.to_response_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::playlist_algebra::SetOperation;

    #[test]
    fn test_provider_error_body() {
        let error = ApiError::from(SetAlgebraError::Provider {
            status: 401,
            message: "The access token expired".into(),
        });

        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            serde_json::to_value(error.to_response_body()).unwrap(),
            serde_json::json!({
                "error": {"message": "The access token expired", "status": 401}
            })
        );
    }

    #[test]
    fn test_empty_result_status() {
        let error = ApiError::from(SetAlgebraError::EmptyResult {
            operation: SetOperation::Intersection,
        });

        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_request_errors() {
        assert_eq!(ApiError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::MissingParameter("first").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadRequest("duplicate field `first`".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(UnknownOperation("difference".into())).status(),
            StatusCode::NOT_FOUND
        );
    }
}
