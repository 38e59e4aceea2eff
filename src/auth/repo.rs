use tracing::debug;

use crate::auth::dto::normalize_email;
use crate::auth::repo_types::{Session, User, UserId};
use crate::error::StorageError;
use crate::storage::{read_json, write_json, KeyValueStore};

const USERS_KEY: &str = "users";
const SESSION_KEY: &str = "session";

/// Typed access to the `users` list.
pub struct UserRepo<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> UserRepo<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All users in registration order.
    pub fn list(&self) -> Result<Vec<User>, StorageError> {
        Ok(read_json(self.store, USERS_KEY)?.unwrap_or_default())
    }

    /// `email` must already be normalised; stored addresses are normalised
    /// here since older stores kept them as typed.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let user = self
            .list()?
            .into_iter()
            .find(|u| normalize_email(&u.email) == email);
        debug!(email, found = user.is_some(), "find_by_email");
        Ok(user)
    }

    pub fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorageError> {
        Ok(self.list()?.into_iter().find(|u| u.id == id))
    }

    /// Appends without checking uniqueness; callers check first.
    pub fn insert(&self, user: &User) -> Result<(), StorageError> {
        let mut users = self.list()?;
        users.push(user.clone());
        write_json(self.store, USERS_KEY, &users)
    }
}

/// Typed access to the single `session` entry.
pub struct SessionRepo<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SessionRepo<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Option<Session>, StorageError> {
        read_json(self.store, SESSION_KEY)
    }

    /// Replaces any existing session.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        write_json(self.store, SESSION_KEY, session)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(SESSION_KEY)
    }
}
