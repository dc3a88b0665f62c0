//! Credentials: Argon2id passwords, JWT access tokens, and hashed opaque
//! tokens for refresh and email confirmation.

pub mod jwt;
pub mod password;
pub mod token;
