//! Axum request handlers for all service endpoints.
//!
//! Write paths encrypt both fields before the store sees them. Only
//! `GET /users/:id` decrypts; `GET /users` returns rows as stored.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    ErrorResponse, HealthResponse, MessageResponse, UserPayload, UserRecord, MSG_USER_CREATED,
    MSG_USER_DELETED, MSG_USER_UPDATED,
};
use common::ServiceError;
use tracing::{debug, error, info};

use super::{error::ApiError, state::AppState};

const MISSING_FIELDS: &str = "El nombre de usuario y la contraseña son obligatorios";
const INVALID_ID: &str = "identificador de usuario inválido";
const USER_NOT_FOUND: &str = "Usuario no encontrado";

/// `POST /users` — encrypt and persist a new record.
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (user_name, password) = required_fields(body)?;

    let sealed = state
        .cipher
        .seal(&user_name, &password)
        .map_err(|e| internal("Error al insertar usuario", e))?;
    let id = state
        .store
        .insert(&sealed)
        .await
        .map_err(|e| internal("Error al insertar usuario", e))?;

    info!(id, "user created");
    Ok(Json(MessageResponse::new(MSG_USER_CREATED)))
}

/// `GET /users` — every record with its fields as stored (ciphertext).
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>, ApiError> {
    let rows = state
        .store
        .list()
        .await
        .map_err(|e| internal("Error al obtener usuarios", e))?;
    Ok(Json(rows.into_iter().map(UserRecord::from).collect()))
}

/// `GET /users/:id` — one record with both fields decrypted.
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserRecord>, ApiError> {
    let id = user_id(id)?;

    let row = state
        .store
        .find(id)
        .await
        .map_err(|e| internal("Error al obtener usuario", e))?
        .ok_or_else(|| ApiError(ServiceError::NotFound(USER_NOT_FOUND.into())))?;

    let record = state
        .cipher
        .open(row)
        .map_err(|e| internal("Error al obtener usuario", e))?;
    Ok(Json(record))
}

/// `PATCH /users/:id` — re-encrypt and overwrite both fields.
///
/// The record is not checked for existence first: an unknown id still
/// answers with the success acknowledgment.
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = user_id(id)?;
    let (user_name, password) = required_fields(body)?;

    let sealed = state
        .cipher
        .seal(&user_name, &password)
        .map_err(|e| internal("Error al editar usuario", e))?;
    let affected = state
        .store
        .update(id, &sealed)
        .await
        .map_err(|e| internal("Error al editar usuario", e))?;

    if affected == 0 {
        debug!(id, "update matched no rows");
    }
    Ok(Json(MessageResponse::new(MSG_USER_UPDATED)))
}

/// `DELETE /users/:id` — remove a record. Same no-existence-check behaviour
/// as [`update_user`].
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = user_id(id)?;

    let affected = state
        .store
        .delete(id)
        .await
        .map_err(|e| internal("Error al eliminar usuario", e))?;

    if affected == 0 {
        debug!(id, "delete matched no rows");
    }
    Ok(Json(MessageResponse::new(MSG_USER_DELETED)))
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` when the store answers a ping, `503` otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let database = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "store ping failed");
            false
        }
    };

    let (status_code, status_str) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        database,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Extraction helpers
// ---------------------------------------------------------------------------

/// Both write fields, present and non-empty. An unreadable body counts as
/// missing fields.
fn required_fields(
    body: Result<Json<UserPayload>, JsonRejection>,
) -> Result<(String, String), ApiError> {
    let missing = || ApiError(ServiceError::BadRequest(MISSING_FIELDS.into()));

    let Json(payload) = body.map_err(|rejection| {
        debug!(error = %rejection, "unreadable user payload");
        missing()
    })?;
    payload
        .fields()
        .map(|(user_name, password)| (user_name.to_owned(), password.to_owned()))
        .ok_or_else(missing)
}

fn user_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = id.map_err(|rejection| {
        debug!(error = %rejection, "invalid user id");
        ApiError(ServiceError::BadRequest(INVALID_ID.into()))
    })?;
    Ok(id)
}

/// Log the underlying cause and answer with a generic message.
fn internal(message: &'static str, cause: impl std::fmt::Display) -> ApiError {
    error!(error = %cause, "{message}");
    ApiError(ServiceError::Internal(message.into()))
}
