use axum::response::{IntoResponse, Response};
use bookstore_db::DbError;
use bookstore_http::{extract::validation_details, AppError};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum SellerError {
    #[error("seller {0} not found")]
    NotFound(i64),

    #[error("invalid seller payload: {message}")]
    Validation {
        message: String,
        details: Vec<serde_json::Value>,
    },

    #[error(transparent)]
    Database(#[from] DbError),
}

pub type SellerResult<T> = Result<T, SellerError>;

impl From<ValidationErrors> for SellerError {
    fn from(errors: ValidationErrors) -> Self {
        SellerError::Validation {
            message: "request validation failed".to_string(),
            details: validation_details(&errors),
        }
    }
}

/// Convert SellerError to AppError for standardized error responses
impl From<SellerError> for AppError {
    fn from(err: SellerError) -> Self {
        match err {
            SellerError::NotFound(id) => AppError::not_found(format!("seller {id} not found")),
            SellerError::Validation { message, details } => AppError::validation(details, message),
            SellerError::Database(e) => AppError::internal(e),
        }
    }
}

impl IntoResponse for SellerError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
