//! Common error types shared across crates.

use thiserror::Error;

use crate::protocol::ErrorResponse;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::Internal`] → 500
///
/// The carried message is sent to the caller verbatim, so it must never
/// contain store details or field plaintext.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field is missing or the path identifier is malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The addressed record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A store or crypto-layer failure. Details are logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in [`ErrorResponse::code`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    /// The caller-facing message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(m)
            | ServiceError::NotFound(m)
            | ServiceError::Internal(m) => m,
        }
    }

    /// Build the JSON error body for this error.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::NotFound("x".into()).http_status(), 404);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("missing userName".into());
        assert!(e.to_string().contains("missing userName"));
    }

    #[test]
    fn response_body_uses_bare_message() {
        let body = ServiceError::NotFound("Usuario no encontrado".into()).to_response();
        assert_eq!(body.code, "not_found");
        assert_eq!(body.message, "Usuario no encontrado");
    }
}
