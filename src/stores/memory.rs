//! A [UserStore] that keeps users in process memory.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{NewUser, User, UserID, stores::UserError, stores::UserStore};

/// Stores users in an append-only list guarded by a mutex.
///
/// Clones share the same list. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserStore {
    /// Create an empty user store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserError> {
        self.users.lock().map_err(|error| {
            tracing::error!("Could not acquire the user store lock: {error}");
            UserError::LockError
        })
    }
}

impl UserStore for InMemoryUserStore {
    fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let mut users = self.lock()?;

        if users
            .iter()
            .any(|user| user.email.as_str() == new_user.email.as_str())
        {
            return Err(UserError::DuplicateEmail);
        }

        let id = UserID::new(users.len() as i64 + 1);
        let user = new_user.with_id(id);
        users.push(user.clone());

        Ok(user)
    }

    fn get(&self, id: UserID) -> Result<User, UserError> {
        self.lock()?
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(UserError::NotFound)
    }

    fn get_by_email(&self, email: &str) -> Result<User, UserError> {
        self.lock()?
            .iter()
            .find(|user| user.email.as_str() == email)
            .cloned()
            .ok_or(UserError::NotFound)
    }

    fn list(&self) -> Result<Vec<User>, UserError> {
        Ok(self.lock()?.clone())
    }

    fn count(&self) -> Result<usize, UserError> {
        Ok(self.lock()?.len())
    }
}
