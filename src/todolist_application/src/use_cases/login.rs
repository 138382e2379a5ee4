use std::sync::LazyLock;

use secrecy::Secret;
use thiserror::Error;
use todolist_core::{
    ErrorKind, HashedPassword, SessionToken, TokenIssuer, User, UserStore, Username,
};

#[derive(Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: Secret<String>,
}

/// Error types specific to login use case
///
/// A missing user and a wrong password are deliberately indistinguishable.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Incorrect username or password")]
    IncorrectCredentials,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl LoginError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoginError::IncorrectCredentials => ErrorKind::Unauthorized,
            LoginError::UnexpectedError(_) => ErrorKind::Internal,
        }
    }
}

/// Login use case - checks credentials and issues a session token
pub struct LoginUseCase<'a, U, T>
where
    U: UserStore,
    T: TokenIssuer,
{
    user_store: &'a U,
    token_issuer: &'a T,
}

impl<'a, U, T> LoginUseCase<'a, U, T>
where
    U: UserStore,
    T: TokenIssuer,
{
    pub fn new(user_store: &'a U, token_issuer: &'a T) -> Self {
        Self {
            user_store,
            token_issuer,
        }
    }

    /// Execute the login use case
    ///
    /// # Returns
    /// A signed session token, `IncorrectCredentials` for any lookup or
    /// password failure, or `UnexpectedError` if the token cannot be signed.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all, fields(username = %request.username))]
    pub async fn execute(&self, request: LoginRequest) -> Result<SessionToken, LoginError> {
        let user = self.find_user(request.username).await;

        // An unknown user still pays for a full verification
        let hash = user.as_ref().map(|user| user.password_hash().clone());
        let matches = verify_password(hash, request.password).await?;

        let user = match user {
            Some(user) if matches => user,
            Some(_) => {
                tracing::debug!("Password mismatch");
                return Err(LoginError::IncorrectCredentials);
            }
            None => return Err(LoginError::IncorrectCredentials),
        };

        let token = self.token_issuer.issue(&user).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            LoginError::UnexpectedError(e.to_string())
        })?;

        tracing::info!(user_id = %user.id(), "User logged in");
        Ok(token)
    }

    async fn find_user(&self, raw_username: String) -> Option<User> {
        let username = Username::parse(raw_username).ok()?;

        self.user_store
            .get_user_by_username(&username)
            .await
            .map_err(|e| tracing::debug!(error = %e, "User lookup failed"))
            .ok()
    }
}

static DUMMY_HASH: LazyLock<Option<HashedPassword>> = LazyLock::new(|| {
    HashedPassword::parse(Secret::new("dummy-password-never-matches".to_owned())).ok()
});

/// Verifies against `hash`, or against a fixed hash nobody knows the
/// password of when there is no user. Never true in the latter case.
#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password(
    hash: Option<HashedPassword>,
    candidate: Secret<String>,
) -> Result<bool, LoginError> {
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| match hash {
            Some(hash) => hash.verify(&candidate),
            None => {
                if let Some(dummy) = DUMMY_HASH.as_ref() {
                    dummy.verify(&candidate);
                }
                false
            }
        })
    })
    .await
    .map_err(|e| LoginError::UnexpectedError(e.to_string()))
}
