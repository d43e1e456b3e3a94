use axum::response::{IntoResponse, Response};
use bookstore_db::DbError;
use bookstore_http::{extract::validation_details, AppError};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("book {0} not found")]
    NotFound(i64),

    #[error("seller {0} does not exist")]
    UnknownSeller(i64),

    #[error("invalid book payload: {message}")]
    Validation {
        message: String,
        details: Vec<serde_json::Value>,
    },

    #[error(transparent)]
    Database(#[from] DbError),
}

pub type BookResult<T> = Result<T, BookError>;

impl From<ValidationErrors> for BookError {
    fn from(errors: ValidationErrors) -> Self {
        BookError::Validation {
            message: "request validation failed".to_string(),
            details: validation_details(&errors),
        }
    }
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NotFound(id) => AppError::not_found(format!("book {id} not found")),
            BookError::UnknownSeller(seller_id) => AppError::validation(
                vec![json!({
                    "field": "seller_id",
                    "code": "unknown_seller",
                    "message": format!("seller {seller_id} does not exist"),
                })],
                "book must reference an existing seller",
            ),
            BookError::Validation { message, details } => AppError::validation(details, message),
            BookError::Database(e) => AppError::internal(e),
        }
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
