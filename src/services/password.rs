// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Password hashing and verification.
//!
//! New passwords are stored as Argon2id PHC strings. Accounts imported
//! from the old system may still hold the plain-text value; those are
//! compared in constant time and flagged so the caller can re-hash them.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};

/// Outcome of checking a password against a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Valid,
    /// Matched a legacy plain-text value; should be re-hashed.
    ValidLegacy,
    Invalid,
}

impl PasswordCheck {
    pub fn is_valid(&self) -> bool {
        !matches!(self, PasswordCheck::Invalid)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored: &str) -> PasswordCheck {
    if stored.starts_with("$argon2") {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return PasswordCheck::Invalid;
        };
        return if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
        {
            PasswordCheck::Valid
        } else {
            PasswordCheck::Invalid
        };
    }

    if bool::from(stored.as_bytes().ct_eq(password.as_bytes())) {
        PasswordCheck::ValidLegacy
    } else {
        PasswordCheck::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(verify_password("s3cret-pass", &hash), PasswordCheck::Valid);
        assert_eq!(verify_password("wrong", &hash), PasswordCheck::Invalid);
    }

    #[test]
    fn test_legacy_plain_text() {
        assert_eq!(verify_password("123456", "123456"), PasswordCheck::ValidLegacy);
        assert_eq!(verify_password("1234567", "123456"), PasswordCheck::Invalid);
        assert!(!verify_password("", "123456").is_valid());
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert_eq!(verify_password("x", "$argon2id$garbage"), PasswordCheck::Invalid);
    }
}
