//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain meaning:
//! - Cookie building and extraction
//! - Client transport / address detection
//! - Cryptographic helpers (random bytes, SHA-1 signing digests, Base64)
//! - Password hashing (Argon2id)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
