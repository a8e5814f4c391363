//! User Entity
//!
//! A CMS account. The password hash lives on the entity but is never
//! serialized; responses go through [`UserView`](crate::presentation::dto::UserView).

use chrono::{DateTime, Utc};
use kernel::Email;
use platform::password::HashedPassword;

use crate::domain::value_object::{principal::Principal, user_role::UserRole};

#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: UserRole,
    pub img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The principal a token issued for this user vouches for.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.role.clone())
    }
}

/// Fields of a user about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: UserRole,
    pub img: Option<String>,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<HashedPassword>,
    pub role: Option<UserRole>,
    pub img: Option<String>,
}

impl UserChanges {
    /// Apply to an in-memory copy.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = Some(name);
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(hash) = self.password_hash {
            user.password_hash = hash;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(img) = self.img {
            user.img = Some(img);
        }
        user.updated_at = Utc::now();
    }
}
