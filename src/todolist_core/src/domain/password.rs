use std::fmt;

use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A salted argon2 hash in PHC string format. The raw password is never kept.
#[derive(Clone)]
pub struct HashedPassword(Secret<String>);

impl HashedPassword {
    /// Validates and hashes a raw password with the default argon2 parameters.
    ///
    /// The length violation and a hashing failure, if both happen, are
    /// reported in the same error.
    pub fn parse(raw: Secret<String>) -> Result<Self, UserError> {
        let candidate = raw.expose_secret();
        let mut reasons = Vec::with_capacity(2);

        if candidate.chars().count() < MIN_PASSWORD_LENGTH {
            reasons.push(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        match Argon2::default().hash_password(candidate.as_bytes(), &salt) {
            Ok(hash) if reasons.is_empty() => return Ok(Self(Secret::new(hash.to_string()))),
            Ok(_) => {}
            Err(e) => reasons.push(format!("Failed to hash password: {e}")),
        }

        Err(UserError::from_reasons(reasons).unwrap_or_else(|| UserError::new("Invalid password")))
    }

    /// Wraps a hash read back from storage, rejecting anything that is not a
    /// PHC string.
    pub fn from_hash(hash: Secret<String>) -> Result<Self, UserError> {
        PasswordHash::new(hash.expose_secret())
            .map_err(|e| UserError::new(format!("Malformed password hash: {e}")))?;
        Ok(Self(hash))
    }

    /// Checks a candidate password against this hash in constant time.
    pub fn verify(&self, candidate: &Secret<String>) -> bool {
        let Ok(expected) = PasswordHash::new(self.0.expose_secret()) else {
            return false;
        };

        Argon2::default()
            .verify_password(candidate.expose_secret().as_bytes(), &expected)
            .is_ok()
    }
}

impl AsRef<Secret<String>> for HashedPassword {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for HashedPassword {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([REDACTED])")
    }
}
