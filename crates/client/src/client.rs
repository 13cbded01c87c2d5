//! [`UserClient`]: typed calls for the five `/users` operations.

use common::protocol::{ErrorResponse, MessageResponse, UserPayload, UserRecord};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Operation};

/// HTTP client for the user-record API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    users_url: String,
}

impl UserClient {
    /// Client for the API rooted at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Client reusing an existing [`reqwest::Client`].
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            users_url: format!("{}/users", base_url.trim_end_matches('/')),
        }
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/{id}", self.users_url)
    }

    /// `POST /users`.
    pub async fn create_user(&self, user: &UserPayload) -> Result<MessageResponse, ClientError> {
        let resp = self.http.post(&self.users_url).json(user).send().await;
        decode(Operation::Create, resp).await
    }

    /// `GET /users` — fields come back as stored ciphertext.
    pub async fn get_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        let resp = self.http.get(&self.users_url).send().await;
        decode(Operation::List, resp).await
    }

    /// `GET /users/:id` — fields come back decrypted.
    pub async fn get_user_by_id(&self, id: i64) -> Result<UserRecord, ClientError> {
        let resp = self.http.get(self.user_url(id)).send().await;
        decode(Operation::Get, resp).await
    }

    /// `PATCH /users/:id` — both fields are always sent.
    pub async fn edit_user(
        &self,
        id: i64,
        user: &UserPayload,
    ) -> Result<MessageResponse, ClientError> {
        let resp = self.http.patch(self.user_url(id)).json(user).send().await;
        decode(Operation::Edit, resp).await
    }

    /// `DELETE /users/:id`.
    pub async fn delete_user(&self, id: i64) -> Result<MessageResponse, ClientError> {
        let resp = self.http.delete(self.user_url(id)).send().await;
        decode(Operation::Delete, resp).await
    }
}

/// Turn a transport result into the expected body, or a prefixed [`ClientError`].
async fn decode<T: DeserializeOwned>(
    operation: Operation,
    resp: Result<Response, reqwest::Error>,
) -> Result<T, ClientError> {
    let resp = resp.map_err(|e| operation.fail(None, e))?;
    let status = resp.status();
    debug!(?operation, status = status.as_u16(), "api response");

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => err.message,
            Err(_) if body.trim().is_empty() => status.to_string(),
            Err(_) => body,
        };
        return Err(operation.fail(Some(status.as_u16()), detail));
    }

    resp.json::<T>()
        .await
        .map_err(|e| operation.fail(Some(status.as_u16()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_fake_api;

    #[tokio::test]
    async fn crud_round_trip_against_fake_api() {
        let client = UserClient::new(&spawn_fake_api().await);

        let ack = client
            .create_user(&UserPayload::new("alice", "secret"))
            .await
            .unwrap();
        assert_eq!(ack.msg, "Usuario creado correctamente");

        let users = client.get_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_ne!(users[0].user_name, "alice");

        let user = client.get_user_by_id(users[0].id).await.unwrap();
        assert_eq!(user.user_name, "alice");
        assert_eq!(user.password, "secret");

        client
            .edit_user(user.id, &UserPayload::new("bob", "hunter2"))
            .await
            .unwrap();
        assert_eq!(client.get_user_by_id(user.id).await.unwrap().user_name, "bob");

        let ack = client.delete_user(user.id).await.unwrap();
        assert_eq!(ack.msg, "Usuario eliminado correctamente");
        assert!(client.get_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_error_message_is_wrapped() {
        let client = UserClient::new(&spawn_fake_api().await);
        let err = client
            .create_user(&UserPayload::new("alice", ""))
            .await
            .unwrap_err();
        assert_eq!(err.operation, Operation::Create);
        assert_eq!(err.status, Some(400));
        assert_eq!(
            err.to_string(),
            "Error al crear usuario: El nombre de usuario y la contraseña son obligatorios"
        );
    }

    #[tokio::test]
    async fn not_found_is_wrapped() {
        let client = UserClient::new(&spawn_fake_api().await);
        let err = client.get_user_by_id(5).await.unwrap_err();
        assert_eq!(err.status, Some(404));
        assert!(err.to_string().starts_with("Error al obtener el usuario: "));
    }

    #[tokio::test]
    async fn transport_failure_is_wrapped() {
        // Bind then drop a listener so the port is (almost certainly) closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = UserClient::new(&format!("http://{addr}"));
        let err = client.get_users().await.unwrap_err();
        assert_eq!(err.operation, Operation::List);
        assert_eq!(err.status, None);
        assert!(err.to_string().starts_with("Error al obtener usuarios: "));
    }

    #[tokio::test]
    async fn preconfigured_http_client_is_used() {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();
        let client = UserClient::with_http(http, &spawn_fake_api().await);
        assert!(client.get_users().await.unwrap().is_empty());
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let client = UserClient::new("http://localhost:3000/");
        assert_eq!(client.users_url, "http://localhost:3000/users");
        assert_eq!(client.user_url(3), "http://localhost:3000/users/3");
    }
}
