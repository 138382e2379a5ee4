use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};

use super::user::UserId;

/// Session tokens are valid for 72 hours unless configured otherwise.
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 72 * 60 * 60;

/// What a session token asserts about its holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A signed, stateless session token handed to the client.
#[derive(Debug, Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for SessionToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
