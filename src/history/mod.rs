mod filter;
mod repo;
pub mod services;

use std::fmt;

use crate::auth::UserId;

pub use filter::HistoryFilter;
pub use repo::HistoryRepo;

/// Which history list a record belongs to. The caller picks it; the store
/// never infers identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKey {
    User(UserId),
    Anonymous,
}

impl HistoryKey {
    pub fn storage_key(&self) -> String {
        match self {
            HistoryKey::User(id) => format!("history:{id}"),
            HistoryKey::Anonymous => "history:anonymous".to_string(),
        }
    }
}

impl fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}
