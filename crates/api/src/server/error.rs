//! HTTP rendering of [`ServiceError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::ServiceError;

/// Handler error: a [`ServiceError`] rendered as its status code plus an
/// [`ErrorResponse`](common::protocol::ErrorResponse) body.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0.to_response())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variant_to_status() {
        let resp = ApiError(ServiceError::NotFound("x".into())).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = ApiError(ServiceError::BadRequest("x".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = ApiError(ServiceError::Internal("x".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
