//! Domain errors and their mapping onto the shared HTTP error type.

use service_core::error::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AstroError {
    #[error("{0}")]
    MissingParameters(String),

    #[error("Invalid {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Unknown service type")]
    UnknownServiceType(String),

    #[error("Order not found")]
    OrderNotFound,

    #[error("Order has not been paid")]
    PaymentRequired(Uuid),
}

impl AstroError {
    pub fn missing(message: impl Into<String>) -> Self {
        AstroError::MissingParameters(message.into())
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AstroError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

impl From<AstroError> for AppError {
    fn from(err: AstroError) -> Self {
        match err {
            AstroError::MissingParameters(_)
            | AstroError::InvalidParameter { .. }
            | AstroError::UnknownServiceType(_) => AppError::BadRequest(err.into()),
            AstroError::OrderNotFound => AppError::NotFound(err.into()),
            AstroError::PaymentRequired(_) => AppError::PaymentRequired(err.into()),
        }
    }
}
