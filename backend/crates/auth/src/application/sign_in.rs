//! Sign In Use Case
//!
//! Email + password login that ends in a signed session token.

use std::sync::Arc;

use kernel::Email;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenCodec;
use crate::domain::entity::user::{User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInOutput {
    pub token: String,
    pub user: User,
}

pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, codec: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            codec,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // A malformed address cannot belong to anyone
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(input.password);
        let stored = user.password_hash.clone();
        let pepper = self.config.password_pepper.clone();

        let (valid, password) = tokio::task::spawn_blocking(move || {
            let valid = stored.verify(&password, pepper.as_deref());
            (valid, password)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("password verification task failed: {e}")))?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = if user.password_hash.needs_rehash() {
            self.upgrade_hash(user, password).await
        } else {
            user
        };

        let token = self.codec.issue(&user.principal())?;

        tracing::info!(user_id = user.id, role = %user.role, "User signed in");

        Ok(SignInOutput { token, user })
    }

    /// Replace a legacy hash with Argon2id. Failure keeps the old hash and
    /// still lets the login through.
    async fn upgrade_hash(&self, user: User, password: ClearTextPassword) -> User {
        let pepper = self.config.password_pepper.clone();
        let hashed = match tokio::task::spawn_blocking(move || password.hash(pepper.as_deref())).await {
            Ok(Ok(hashed)) => hashed,
            Ok(Err(e)) => {
                tracing::warn!(user_id = user.id, error = %e, "Password rehash failed");
                return user;
            }
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "Password rehash task failed");
                return user;
            }
        };

        let changes = UserChanges {
            password_hash: Some(hashed),
            ..Default::default()
        };
        match self.user_repo.update(user.id, changes).await {
            Ok(updated) => {
                tracing::info!(user_id = updated.id, "Legacy password hash upgraded to Argon2id");
                updated
            }
            Err(e) => {
                tracing::warn!(user_id = user.id, error = %e, "Storing upgraded password hash failed");
                user
            }
        }
    }
}
