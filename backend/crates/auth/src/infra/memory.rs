//! In-memory user repository
//!
//! Same contract as the PostgreSQL implementation, including email
//! uniqueness. Backs the router tests and local demos without a database.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::{Email, StoreError, StoreResult};

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::repository::UserRepository;

#[derive(Default)]
struct State {
    next_id: i32,
    users: Vec<User>,
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Internal("user store lock poisoned".to_string()))
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> StoreResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.lock()?.users.clone())
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut state = self.lock()?;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("users_email_key".to_string()));
        }

        state.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.next_id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            img: user.img,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> StoreResult<User> {
        let mut state = self.lock()?;
        if let Some(email) = &changes.email {
            if state.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Conflict("users_email_key".to_string()));
            }
        }

        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        changes.apply_to(user);
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let mut state = self.lock()?;
        let before = state.users.len();
        state.users.retain(|u| u.id != id);
        if state.users.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
