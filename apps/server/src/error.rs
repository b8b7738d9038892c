use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hivebook_core::dashboard::AggregationError;
use hivebook_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::Aggregation(
            AggregationError::UnknownWindow(_) | AggregationError::UnknownMode(_),
        ) => StatusCode::BAD_REQUEST,
        CoreError::NotFound { .. } | CoreError::Database(DatabaseError::NotFound(_)) => {
            StatusCode::NOT_FOUND
        }
        CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            core_status(&CoreError::invalid("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            core_status(&CoreError::not_found("Hive", "h-1")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            core_status(&CoreError::Database(DatabaseError::UniqueViolation(
                "invoices.invoice_number".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            core_status(&CoreError::Aggregation(AggregationError::UnknownWindow(
                "2w".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            core_status(&CoreError::Saga("invoice could not be removed".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
