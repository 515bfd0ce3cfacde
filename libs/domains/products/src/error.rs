use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Outcome classification for product operations.
///
/// Every variant is terminal; nothing here is retried.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Product with name '{0}' already exists")]
    AlreadyExists(String),

    #[error("Product with id {0} not found")]
    NotFound(i64),

    /// The store failed or rejected the operation
    #[error("Storage failure: {0}")]
    Infrastructure(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            e @ ProductError::AlreadyExists(_) => AppError::Conflict(e.to_string()),
            e @ ProductError::NotFound(_) => AppError::NotFound(e.to_string()),
            ProductError::Infrastructure(msg) => AppError::Storage(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::Validation("name".into()), StatusCode::BAD_REQUEST),
            (ProductError::AlreadyExists("Desk".into()), StatusCode::CONFLICT),
            (ProductError::NotFound(3), StatusCode::NOT_FOUND),
            (
                ProductError::Infrastructure("pool closed".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ProductError::NotFound(9).to_string(),
            "Product with id 9 not found"
        );
        assert_eq!(
            ProductError::AlreadyExists("Lamp".into()).to_string(),
            "Product with name 'Lamp' already exists"
        );
    }
}
