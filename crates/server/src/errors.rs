use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use models::errors::ModelError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const INVALID_BODY: &str = "Invalid body request";
pub const INVALID_ID: &str = "Invalid id";
pub const INVALID_YEAR: &str = "Year must be a number";
pub const INVALID_DIMENSION: &str = "Invalid dimensions";
pub const MISSING_HEIGHT_AND_WIDTH: &str = "Height and width are required";
pub const MISSING_WEIGHT_RANGE: &str = "Weight range is required";
pub const INVALID_QUERY_PARAM: &str = "Invalid query param format";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Error response rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::AlreadyExists => StatusCode::CONFLICT,
            ServiceError::InvalidRange
            | ServiceError::InvalidFuelType
            | ServiceError::Model(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // parser details are not part of the public message
        if let ServiceError::Model(ModelError::Validation(_)) = &e {
            return Self::bad_request(INVALID_BODY);
        }
        if status.is_server_error() {
            // details stay in the log, the client gets a generic message
            error!(error = %e, "unexpected service error");
            return Self::internal();
        }
        Self::new(status, e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot load vehicle data: {0}")]
    DataLoad(#[from] ServiceError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::AlreadyExists, StatusCode::CONFLICT),
            (ServiceError::InvalidRange, StatusCode::BAD_REQUEST),
            (ServiceError::InvalidFuelType, StatusCode::BAD_REQUEST),
            (ModelError::Validation("x".into()).into(), StatusCode::BAD_REQUEST),
            (ModelError::MissingField("brand".into()).into(), StatusCode::BAD_REQUEST),
            (ServiceError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let e = JsonApiError::from(ServiceError::Internal("disk on fire".into()));
        assert_eq!(e.message, INTERNAL_SERVER_ERROR);
        let e = JsonApiError::from(ServiceError::NotFound);
        assert_eq!(e.message, "Vehicle(s) not found");
    }

    #[test]
    fn payload_errors_use_public_messages() {
        let e = JsonApiError::from(ServiceError::from(ModelError::MissingField("color".into())));
        assert_eq!(e.message, "color is required");
        let e = JsonApiError::from(ServiceError::from(ModelError::Validation(
            "invalid type: string \"x\", expected i32".into(),
        )));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, INVALID_BODY);
    }
}
