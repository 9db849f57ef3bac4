//! Password value object - hashing and verification of user credentials.
//!
//! Plain text never leaves this module except as the argument to `new` and
//! `verify`; the stored form is an Argon2id PHC string with a per-hash salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Well-formed hash that matches no password.
///
/// Verified against when a login names an unknown e-mail, so both failure
/// paths pay the same hashing cost.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$W7oQ3Ly8HbJ9u8o0WQ0ZpHh5pQk7Zy1J4e1hN3zQ2xA";

/// Hashed password.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password with a fresh random salt.
    ///
    /// # Errors
    /// Returns an internal error if the hasher rejects its parameters.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Stand-in used when no stored hash exists.
    pub fn dummy() -> Self {
        Self::from_hash(DUMMY_PASSWORD_HASH)
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// True iff `plain_text` re-hashes to this hash. Never fails: an
    /// unparsable stored hash simply does not match.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("secret1").unwrap();

        assert!(password.verify("secret1"));
        assert!(!password.verify("secret2"));
    }

    #[test]
    fn test_password_from_hash() {
        let hash = Password::new("blackberry rosé").unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify("blackberry rosé"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("SamePassword").unwrap();
        let pass2 = Password::new("SamePassword").unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify("SamePassword"));
        assert!(pass2.verify("SamePassword"));
    }

    #[test]
    fn test_hash_is_not_plain_text() {
        let password = Password::new("secret1").unwrap();
        assert!(!password.as_str().contains("secret1"));
        assert!(password.as_str().starts_with("$argon2id$"));
    }

    #[test]
    fn test_garbage_hash_never_matches() {
        assert!(!Password::from_hash("not-a-hash").verify("anything"));
        assert!(!Password::dummy().verify("secret1"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("secret1").unwrap();
        assert!(!format!("{:?}", password).contains(password.as_str()));
    }
}
