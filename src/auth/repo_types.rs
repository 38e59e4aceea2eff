use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// User identifier. New accounts get a UUID v7; stores written by the
/// browser version hold the numeric millisecond timestamp it used instead.
/// Both orders follow creation time, and legacy ids sort before UUIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Legacy(i64),
    V7(Uuid),
}

impl UserId {
    pub fn generate() -> Self {
        UserId::V7(Uuid::now_v7())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Legacy(ms) => write!(f, "{ms}"),
            UserId::V7(id) => write!(f, "{id}"),
        }
    }
}

/// Stored account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,                // unique, lowercased
    #[serde(rename = "password")]
    pub password_digest: String,      // argon2 PHC string or legacy decimal digest
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Persisted login. Only restored on startup when `remember` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub remember: bool,
}
