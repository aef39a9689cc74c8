use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("{0} is required")]
    MissingField(String),
    #[error("validation error: {0}")]
    Validation(String),
}
