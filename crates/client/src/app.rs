//! One user action in, one rendered screen out.
//!
//! Mutating actions never patch local state: after the server acknowledges
//! them the list is fetched again and re-rendered from scratch. A failed
//! refresh is only a warning; the mutation has already been applied.

use common::protocol::UserPayload;
use tracing::warn;

use crate::client::UserClient;
use crate::error::ClientError;
use crate::render::{user_detail, user_table, Notification};

/// Something the user asked the front end to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Show(i64),
    Create(UserPayload),
    Edit(i64, UserPayload),
    Delete(i64),
}

impl Action {
    fn mutates(&self) -> bool {
        matches!(self, Action::Create(_) | Action::Edit(..) | Action::Delete(_))
    }
}

/// Shown when the user declines the delete confirmation.
pub const DELETE_CANCELLED: &str = "Eliminación cancelada";

/// Result of an action: banners plus the view body, if any.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Screen {
    pub notifications: Vec<Notification>,
    pub body: Option<String>,
}

impl Screen {
    /// Screen for a delete the user declined to confirm.
    pub fn cancelled() -> Self {
        Self {
            notifications: vec![Notification::Warning(DELETE_CANCELLED.into())],
            body: None,
        }
    }

    /// `true` if any notification is an error.
    pub fn failed(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| matches!(n, Notification::Error(_)))
    }

    fn error(&mut self, err: ClientError) {
        warn!(operation = ?err.operation, status = ?err.status, "api call failed");
        self.notifications.push(Notification::Error(err.to_string()));
    }

    fn warning(&mut self, err: ClientError) {
        warn!(operation = ?err.operation, status = ?err.status, "list refresh failed");
        self.notifications.push(Notification::Warning(err.to_string()));
    }
}

/// Run `action` against the API and build the screen to show.
pub async fn execute(client: &UserClient, action: Action) -> Screen {
    let mut screen = Screen::default();
    let refresh = action.mutates();

    let outcome = match action {
        Action::List => client.get_users().await.map(|users| {
            screen.body = Some(user_table(&users));
            None
        }),
        Action::Show(id) => client.get_user_by_id(id).await.map(|user| {
            screen.body = Some(user_detail(&user));
            None
        }),
        Action::Create(user) => client.create_user(&user).await.map(|ack| Some(ack.msg)),
        Action::Edit(id, user) => client.edit_user(id, &user).await.map(|ack| Some(ack.msg)),
        Action::Delete(id) => client.delete_user(id).await.map(|ack| Some(ack.msg)),
    };

    match outcome {
        Ok(Some(msg)) => screen.notifications.push(Notification::Success(msg)),
        Ok(None) => {}
        Err(e) => {
            screen.error(e);
            return screen;
        }
    }

    if refresh {
        match client.get_users().await {
            Ok(users) => screen.body = Some(user_table(&users)),
            Err(e) => screen.warning(e),
        }
    }
    screen
}
