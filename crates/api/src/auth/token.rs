//! Opaque bearer secrets: refresh tokens and email confirmation tokens.
//!
//! Only the SHA-256 hex digest is stored; the plaintext leaves the server
//! once, in a response body or a confirmation link.

use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct OpaqueToken {
    pub plaintext: String,
    pub hash: String,
}

impl OpaqueToken {
    pub fn generate() -> Self {
        let plaintext = Uuid::new_v4().simple().to_string();
        let hash = hash_token(&plaintext);
        Self { plaintext, hash }
    }
}

/// SHA-256 hex digest used to look a token up.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_hex() {
        let token = OpaqueToken::generate();
        assert_eq!(token.hash, hash_token(&token.plaintext));
        assert_eq!(token.hash.len(), 64);
        assert!(token.hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(OpaqueToken::generate().plaintext, OpaqueToken::generate().plaintext);
    }
}
