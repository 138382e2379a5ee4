use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{email::Email, now_in_seconds, password::HashedPassword, username::Username};

uuid_id!(
    /// Opaque user identity, generated at signup.
    UserId
);

/// Credential validation failure.
///
/// Holds every reason the input was rejected so callers can report all of
/// them at once instead of only the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .reasons.join("; "))]
pub struct UserError {
    reasons: Vec<String>,
}

impl UserError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reasons: vec![reason.into()],
        }
    }

    /// Returns `None` when there is nothing to report.
    pub fn from_reasons(reasons: Vec<String>) -> Option<Self> {
        if reasons.is_empty() {
            None
        } else {
            Some(Self { reasons })
        }
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Folds several validation failures into one.
    pub fn merge(errors: impl IntoIterator<Item = UserError>) -> Option<Self> {
        let reasons = errors
            .into_iter()
            .flat_map(|error| error.reasons)
            .collect();
        Self::from_reasons(reasons)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    created_at: DateTime<Utc>,
    username: Username,
    email: Email,
    password_hash: HashedPassword,
}

impl User {
    pub fn new(username: Username, email: Email, password_hash: HashedPassword) -> Self {
        Self {
            id: UserId::new(),
            created_at: now_in_seconds(),
            username,
            email,
            password_hash,
        }
    }

    /// Rebuilds a user that was read back from storage.
    pub fn from_parts(
        id: UserId,
        created_at: DateTime<Utc>,
        username: Username,
        email: Email,
        password_hash: HashedPassword,
    ) -> Self {
        Self {
            id,
            created_at,
            username,
            email,
            password_hash,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
}
