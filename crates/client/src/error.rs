//! Domain error raised by every [`UserClient`](crate::UserClient) call.

use std::fmt;

use thiserror::Error;

/// The API operation a [`ClientError`] belongs to; selects the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Edit,
    Delete,
}

impl Operation {
    /// Human-readable prefix shown in front of every failure of this operation.
    pub fn prefix(self) -> &'static str {
        match self {
            Operation::Create => "Error al crear usuario",
            Operation::List => "Error al obtener usuarios",
            Operation::Get => "Error al obtener el usuario",
            Operation::Edit => "Error al editar el usuario",
            Operation::Delete => "Error al eliminar el usuario",
        }
    }

    pub(crate) fn fail(self, status: Option<u16>, detail: impl fmt::Display) -> ClientError {
        ClientError {
            operation: self,
            status,
            detail: detail.to_string(),
        }
    }
}

/// A transport failure or non-2xx answer, rewrapped with a prefixed message.
#[derive(Debug, Error)]
#[error("{}: {detail}", .operation.prefix())]
pub struct ClientError {
    /// Which call failed.
    pub operation: Operation,
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    /// Server-provided message, or the transport error text.
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_prefixed_per_operation() {
        let e = Operation::Create.fail(Some(400), "campos obligatorios");
        assert_eq!(e.to_string(), "Error al crear usuario: campos obligatorios");
        let e = Operation::Delete.fail(None, "connection refused");
        assert!(e.to_string().starts_with("Error al eliminar el usuario: "));
        assert_eq!(e.status, None);
    }
}
