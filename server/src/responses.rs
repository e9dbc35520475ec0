use axum::{http::StatusCode, response::IntoResponse, Json};

use unquote_api_types::ErrorResponse;

/// An HTTP error response, following the teacher's `responses::Error`
/// shape but carrying spec.md §6's `{error, code?}` envelope instead of
/// `{message}`.
pub(crate) struct Error {
    status_code: StatusCode,
    body: ErrorResponse,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, Json(self.body)).into_response()
    }
}

impl Error {
    pub(crate) fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            body: ErrorResponse::new(message),
        }
    }

    pub(crate) fn with_code(
        status_code: StatusCode,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            body: ErrorResponse::with_code(message, code),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::BAD_REQUEST, message, "invalid_input")
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::NOT_FOUND, message, "not_found")
    }

    pub(crate) fn unavailable(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::SERVICE_UNAVAILABLE, message, "unavailable")
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::with_code(StatusCode::INTERNAL_SERVER_ERROR, message, "internal")
    }
}
