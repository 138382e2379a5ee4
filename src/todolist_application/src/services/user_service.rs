use todolist_core::{SessionClaims, SessionToken, TokenError, TokenIssuer, User, UserStore};

use crate::use_cases::{
    login::{LoginError, LoginRequest, LoginUseCase},
    signup::{SignupError, SignupRequest, SignupUseCase},
};

/// Entry point for signup, login and session checks.
#[derive(Clone)]
pub struct UserService<U, T> {
    user_store: U,
    token_issuer: T,
}

impl<U, T> UserService<U, T>
where
    U: UserStore,
    T: TokenIssuer,
{
    pub fn new(user_store: U, token_issuer: T) -> Self {
        Self {
            user_store,
            token_issuer,
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<User, SignupError> {
        SignupUseCase::new(&self.user_store).execute(request).await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<SessionToken, LoginError> {
        LoginUseCase::new(&self.user_store, &self.token_issuer)
            .execute(request)
            .await
    }

    /// Checks a token previously returned by `login`.
    pub fn verify_session(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.token_issuer.verify(token)
    }
}
