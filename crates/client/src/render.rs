//! Plain-text rendering of user records and notifications.

use std::fmt;

use chrono::{DateTime, Utc};
use common::protocol::UserRecord;

/// Widest a field may be in the list table before it is truncated.
pub const LIST_FIELD_WIDTH: usize = 24;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A banner shown after an operation.
///
/// Only [`Notification::Error`] marks the operation itself as failed;
/// a warning reports a problem that happened after it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Warning(String),
    Error(String),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Success(msg) => write!(f, "[ok] {msg}"),
            Notification::Warning(msg) => write!(f, "[warn] {msg}"),
            Notification::Error(msg) => write!(f, "[error] {msg}"),
        }
    }
}

/// Table of every record, one per line, under a header row.
pub fn user_table(users: &[UserRecord]) -> String {
    if users.is_empty() {
        return "No hay usuarios registrados.\n".into();
    }

    let w = LIST_FIELD_WIDTH;
    let mut out = format!(
        "{:>4}  {:<w$}  {:<w$}  {:<19}  {:<19}\n",
        "ID", "USUARIO", "CONTRASEÑA", "CREADO", "ACTUALIZADO"
    );
    for u in users {
        out.push_str(&format!(
            "{:>4}  {:<w$}  {:<w$}  {:<19}  {:<19}\n",
            u.id,
            truncate(&u.user_name, w),
            truncate(&u.password, w),
            timestamp(&u.created_at),
            timestamp(&u.updated_at),
        ));
    }
    out
}

/// Every field of one record, untruncated.
pub fn user_detail(user: &UserRecord) -> String {
    format!(
        "ID:          {}\nUsuario:     {}\nContraseña:  {}\nCreado:      {}\nActualizado: {}\n",
        user.id,
        user.user_name,
        user.password,
        timestamp(&user.created_at),
        timestamp(&user.updated_at),
    )
}

fn timestamp(t: &DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Cut `s` to at most `width` characters, marking the cut with an ellipsis.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_owned();
    }
    let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: i64, user_name: &str, password: &str) -> UserRecord {
        let t = Utc.with_ymd_and_hms(2024, 3, 12, 0, 15, 38).unwrap();
        UserRecord {
            id,
            user_name: user_name.into(),
            password: password.into(),
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(user_table(&[]), "No hay usuarios registrados.\n");
    }

    #[test]
    fn table_truncates_long_ciphertext() {
        let long = "v1.".to_string() + &"A".repeat(80);
        let table = user_table(&[record(1, &long, &long)]);
        let row = table.lines().nth(1).unwrap();
        assert!(row.contains('…'));
        assert!(!row.contains(&long));
        assert!(row.contains("2024-03-12 00:15:38"));
    }

    #[test]
    fn table_keeps_short_fields() {
        let table = user_table(&[record(1, "alice", "secret"), record(2, "bob", "pw")]);
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("alice"));
        assert!(table.contains("bob"));
    }

    #[test]
    fn detail_shows_full_values() {
        let long = "x".repeat(60);
        let detail = user_detail(&record(9, &long, "secret"));
        assert!(detail.contains(&long));
        assert!(detail.contains("secret"));
        assert!(detail.starts_with("ID:          9\n"));
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("ñññññ", 5), "ñññññ");
        assert_eq!(truncate("ññññññ", 5), "ññññ…");
    }

    #[test]
    fn notifications_are_labelled() {
        assert_eq!(Notification::Success("hecho".into()).to_string(), "[ok] hecho");
        assert_eq!(Notification::Warning("ojo".into()).to_string(), "[warn] ojo");
        assert_eq!(Notification::Error("fallo".into()).to_string(), "[error] fallo");
    }
}
