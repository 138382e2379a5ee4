use thiserror::Error;

use crate::{
    domain::{
        session::{SessionClaims, SessionToken},
        user::User,
    },
    error_kind::ErrorKind,
};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Token has expired")]
    Expired,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidToken(_) | Self::Expired => ErrorKind::Unauthorized,
            Self::UnexpectedError(_) => ErrorKind::Internal,
        }
    }
}

/// Port trait for issuing and checking session tokens
pub trait TokenIssuer: Send + Sync {
    /// Signs a session token for `user`, valid from now until the configured TTL elapses.
    fn issue(&self, user: &User) -> Result<SessionToken, TokenError>;

    /// Checks signature and expiry and returns the embedded claims.
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError>;
}
