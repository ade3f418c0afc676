use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use rsvp_db::error::StoreError;
use rsvp_types::validate::ValidationError;

/// Request-level failures. Every variant renders as the
/// `{success: false, message}` body the form scripts expect; infrastructure
/// detail stays in the server logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body that could not be deserialized at all. The serde detail stays
    /// in the logs; the client only sees the generic message.
    #[error("Datos de solicitud inválidos")]
    MalformedPayload,

    #[error("Este email ya ha sido registrado anteriormente")]
    DuplicateEmail,

    #[error("Error de conexión a la base de datos. Por favor, intenta más tarde.")]
    StoreUnavailable,

    #[error("Error interno del servidor")]
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::DuplicateEmail,
            other => {
                error!("store failure: {other}");
                ApiError::StoreUnavailable
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) | ApiError::MalformedPayload => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({ "success": false, "message": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                ApiError::Validation(ValidationError::InvalidEmailFormat),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::MalformedPayload, StatusCode::BAD_REQUEST),
            (ApiError::DuplicateEmail, StatusCode::CONFLICT),
            (ApiError::StoreUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (ApiError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn duplicate_store_error_becomes_conflict() {
        let err: ApiError = StoreError::DuplicateEmail.into();
        assert!(matches!(err, ApiError::DuplicateEmail));
    }

    #[test]
    fn validation_message_passes_through() {
        let err: ApiError = ValidationError::AttendeesOutOfRange.into();
        assert_eq!(
            err.to_string(),
            "El número de asistentes debe estar entre 1 y 10"
        );
    }
}
