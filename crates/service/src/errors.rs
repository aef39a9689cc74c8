use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Vehicle(s) not found")]
    NotFound,
    #[error("Vehicle already exists")]
    AlreadyExists,
    #[error("Max speed must be between 0 and 500")]
    InvalidRange,
    #[error("Invalid fuel type")]
    InvalidFuelType,
    #[error("internal error: {0}")]
    Internal(String),
    /// Rejected creation payload.
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Internal(format!("{context}: {err}"))
    }
}
