//! Password Hashing and Verification
//!
//! - Argon2id hashing in PHC string format
//! - Verification of legacy bcrypt hashes (`$2a$`/`$2b$`/`$2y$`), which are
//!   never produced, only upgraded on the next successful login
//! - NFKC normalization so visually identical input hashes identically
//! - Zeroization of clear text on drop
//!
//! The length policy applies when a password is *set*. Login input is only
//! normalized, so a policy change never locks out existing accounts.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory when dropped.
///
/// Not `Clone`; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a new password, enforcing the length and character policy.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Code points, not bytes
        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Wrap a login attempt. Normalized, never rejected.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with Argon2id and a fresh random salt.
    ///
    /// CPU-bound (tens of milliseconds); async callers run it on a blocking
    /// thread.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = peppered(self, pepper);
        let salt = SaltString::generate(OsRng);

        // OWASP defaults: m=19456 (19 MiB), t=2, p=1
        let hash = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
            scheme: Scheme::Argon2,
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheme {
    Argon2,
    Bcrypt,
}

/// Stored password hash: Argon2id in PHC string format (algorithm, params,
/// salt, digest), or a legacy bcrypt string.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
    scheme: Scheme,
}

impl HashedPassword {
    /// Parse a stored hash string.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        if is_bcrypt(&hash) {
            return Ok(Self {
                hash,
                scheme: Scheme::Bcrypt,
            });
        }
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self {
            hash,
            scheme: Scheme::Argon2,
        })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// `true` for bcrypt hashes, which should be replaced with a fresh
    /// Argon2id hash once the clear text is known to match.
    pub fn needs_rehash(&self) -> bool {
        self.scheme == Scheme::Bcrypt
    }

    /// Constant-time verification. An unparsable stored hash never matches.
    ///
    /// Bcrypt hashes predate the pepper, so it is not applied to them.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        match self.scheme {
            Scheme::Bcrypt => bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false),
            Scheme::Argon2 => {
                let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
                    return false;
                };

                Argon2::default()
                    .verify_password(&peppered(password, pepper), &parsed_hash)
                    .is_ok()
            }
        }
    }
}

// Modular crypt format: `$2b$<cost>$<53 chars of salt and digest>`
fn is_bcrypt(hash: &str) -> bool {
    const PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];
    hash.len() == 60 && PREFIXES.iter().any(|p| hash.starts_with(p))
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

fn peppered(password: &ClearTextPassword, pepper: Option<&[u8]>) -> Vec<u8> {
    let mut bytes = password.as_bytes().to_vec();
    if let Some(p) = pepper {
        bytes.extend_from_slice(p);
    }
    bytes
}
