//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use sha1::{Digest, Sha1};

/// Lower-case hex SHA-1 digest.
///
/// Only for request signing schemes that mandate SHA-1 (Cloudinary's
/// upload API); never for passwords.
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_hex_known_values() {
        assert_eq!(sha1_hex(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(sha1_hex(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_base64_standard_alphabet() {
        assert_eq!(to_base64(b"%PDF-1.7"), "JVBERi0xLjc=");
        assert_eq!(to_base64(&[0xfb, 0xff]), "+/8=");
    }
}
