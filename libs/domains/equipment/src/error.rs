use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EquipmentError {
    #[error("Equipment {0} not found")]
    NotFound(Uuid),

    #[error("Equipment with serial number '{0}' not found")]
    SerialNotFound(String),

    #[error("Equipment with serial number '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error(
        "Serial number '{serial}' does not start with the '{expected}' prefix required for the {category} category"
    )]
    InvalidPrefix {
        serial: String,
        category: &'static str,
        expected: &'static str,
    },

    #[error("Incrementing by {requested} would exceed the maximum stock capacity ({available} free)")]
    CapacityExceeded { requested: i32, available: i32 },

    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type EquipmentResult<T> = Result<T, EquipmentError>;

/// Convert EquipmentError to AppError for standardized error responses.
///
/// Every business-rule rejection maps to 400; only lookups by an unknown
/// id or serial produce 404.
impl From<EquipmentError> for AppError {
    fn from(err: EquipmentError) -> Self {
        match err {
            EquipmentError::NotFound(_) | EquipmentError::SerialNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            EquipmentError::AlreadyRegistered(_)
            | EquipmentError::InvalidPrefix { .. }
            | EquipmentError::CapacityExceeded { .. }
            | EquipmentError::InsufficientStock { .. }
            | EquipmentError::Validation(_) => AppError::BadRequest(err.to_string()),
            EquipmentError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EquipmentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EquipmentError {
    fn from(err: mongodb::error::Error) -> Self {
        EquipmentError::Database(err.to_string())
    }
}
