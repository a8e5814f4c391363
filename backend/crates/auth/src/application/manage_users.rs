//! User Management Use Case
//!
//! Admin-side account CRUD. Passwords are hashed here so repositories only
//! ever see hashes.

use std::sync::Arc;

use kernel::{Email, StoreError};
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: String,
    pub role: String,
    pub password: String,
}

/// Bootstrap administrator read from `ADMIN_EMAIL`, `ADMIN_PASSWORD`
/// and `ADMIN_NAME`
pub struct AdminSeed {
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl AdminSeed {
    /// `None` unless both email and password are set
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Some(Self {
            email: var("ADMIN_EMAIL")?,
            password: var("ADMIN_PASSWORD")?,
            name: var("ADMIN_NAME"),
        })
    }
}

#[derive(Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub img: Option<String>,
}

pub struct ManageUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ManageUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn list(&self) -> AuthResult<Vec<User>> {
        Ok(self.user_repo.list().await?)
    }

    pub async fn get(&self, id: i32) -> AuthResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn create(&self, input: CreateUserInput) -> AuthResult<User> {
        let email = Email::new(&input.email).map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let role = parse_role(&input.role)?;
        let password_hash = self.hash_password(input.password).await?;

        let user = self
            .user_repo
            .create(NewUser {
                name: non_blank(input.name),
                email,
                password_hash,
                role,
                img: None,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Store(other),
            })?;

        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn update(&self, id: i32, input: UpdateUserInput) -> AuthResult<User> {
        let email = input
            .email
            .map(|e| Email::new(e).map_err(|err| AuthError::Validation(err.message().to_string())))
            .transpose()?;
        let role = input.role.as_deref().map(parse_role).transpose()?;

        // Empty password means "keep the current one"
        let password_hash = match input.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: non_blank(input.name),
            email,
            password_hash,
            role,
            img: input.img,
        };

        let user = self.user_repo.update(id, changes).await.map_err(|e| match e {
            StoreError::NotFound => AuthError::UserNotFound,
            StoreError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Store(other),
        })?;

        tracing::info!(user_id = user.id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: i32) -> AuthResult<()> {
        self.user_repo.delete(id).await.map_err(|e| match e {
            StoreError::NotFound => AuthError::UserNotFound,
            other => AuthError::Store(other),
        })?;

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Create the admin account, or reset its password when the email is
    /// already registered. The role of an existing account is left alone.
    pub async fn ensure_admin(&self, seed: AdminSeed) -> AuthResult<User> {
        let email = Email::new(&seed.email).map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let password_hash = self.hash_password(seed.password).await?;

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(existing) => {
                let changes = UserChanges {
                    password_hash: Some(password_hash),
                    ..UserChanges::default()
                };
                let user = self.user_repo.update(existing.id, changes).await?;
                tracing::info!(user_id = user.id, "Admin password reset from environment");
                user
            }
            None => {
                let user = self
                    .user_repo
                    .create(NewUser {
                        name: non_blank(seed.name),
                        email,
                        password_hash,
                        role: UserRole::Admin,
                        img: None,
                    })
                    .await?;
                tracing::info!(user_id = user.id, "Admin account created");
                user
            }
        };

        Ok(user)
    }

    async fn hash_password(&self, raw: String) -> AuthResult<HashedPassword> {
        let password = ClearTextPassword::new(raw)?;
        let pepper = self.config.password_pepper.clone();

        tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
            .await
            .map_err(|e| AuthError::Internal(format!("password hashing task failed: {e}")))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

fn parse_role(raw: &str) -> AuthResult<UserRole> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AuthError::Validation("Role is required".to_string()));
    }
    Ok(UserRole::from_code(raw))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
