//! In-process stand-in for the API, served on an ephemeral port.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use common::protocol::{
    ErrorResponse, MessageResponse, UserPayload, UserRecord, MSG_USER_CREATED, MSG_USER_DELETED,
    MSG_USER_UPDATED,
};

type Users = Arc<Mutex<Vec<UserRecord>>>;

#[derive(Clone, Default)]
struct FakeApi {
    users: Users,
    list_fails: bool,
}

/// Start the fake API and return its base URL.
pub async fn spawn_fake_api() -> String {
    serve(FakeApi::default()).await
}

/// Like [`spawn_fake_api`], but `GET /users` always answers 500.
pub async fn spawn_fake_api_with_failing_list() -> String {
    serve(FakeApi {
        list_fails: true,
        ..FakeApi::default()
    })
    .await
}

async fn serve(state: FakeApi) -> String {
    let app = Router::new()
        .route("/users", get(list).post(create))
        .route("/users/:id", get(get_one).patch(edit).delete(remove))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn missing_fields() -> Response {
    let err = ErrorResponse::new(
        "bad_request",
        "El nombre de usuario y la contraseña son obligatorios",
    );
    (StatusCode::BAD_REQUEST, Json(err)).into_response()
}

async fn create(
    State(FakeApi { users, .. }): State<FakeApi>,
    Json(body): Json<UserPayload>,
) -> Response {
    let Some((user_name, password)) = body.fields() else {
        return missing_fields();
    };
    let mut users = users.lock().unwrap();
    let now = Utc::now();
    let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    users.push(UserRecord {
        id,
        user_name: user_name.into(),
        password: password.into(),
        created_at: now,
        updated_at: now,
    });
    Json(MessageResponse::new(MSG_USER_CREATED)).into_response()
}

async fn list(State(api): State<FakeApi>) -> Response {
    if api.list_fails {
        let err = ErrorResponse::new("internal_error", "Error al obtener usuarios");
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(err)).into_response();
    }
    let users = api.users.lock().unwrap();
    Json(
        users
            .iter()
            .map(|u| UserRecord {
                user_name: format!("v1.opaque-user-{}", u.id),
                password: format!("v1.opaque-password-{}", u.id),
                ..u.clone()
            })
            .collect::<Vec<_>>(),
    )
    .into_response()
}

async fn get_one(
    State(FakeApi { users, .. }): State<FakeApi>,
    Path(id): Path<i64>,
) -> Response {
    match users.lock().unwrap().iter().find(|u| u.id == id) {
        Some(u) => Json(u.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("not_found", "Usuario no encontrado")),
        )
            .into_response(),
    }
}

async fn edit(
    State(FakeApi { users, .. }): State<FakeApi>,
    Path(id): Path<i64>,
    Json(body): Json<UserPayload>,
) -> Response {
    let Some((user_name, password)) = body.fields() else {
        return missing_fields();
    };
    if let Some(u) = users.lock().unwrap().iter_mut().find(|u| u.id == id) {
        u.user_name = user_name.into();
        u.password = password.into();
        u.updated_at = Utc::now();
    }
    Json(MessageResponse::new(MSG_USER_UPDATED)).into_response()
}

async fn remove(
    State(FakeApi { users, .. }): State<FakeApi>,
    Path(id): Path<i64>,
) -> Json<MessageResponse> {
    users.lock().unwrap().retain(|u| u.id != id);
    Json(MessageResponse::new(MSG_USER_DELETED))
}
