use secrecy::Secret;
use thiserror::Error;
use todolist_core::{
    Email, ErrorKind, HashedPassword, User, UserError, UserStore, UserStoreError, Username,
};

/// Raw signup input, exactly as the client sent it.
#[derive(Debug)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
}

/// Error types specific to signup use case
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("User already exists")]
    AlreadyExists,
    #[error("Invalid signup data: {0}")]
    Validation(#[from] UserError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl SignupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignupError::AlreadyExists => ErrorKind::Conflict,
            SignupError::Validation(_) => ErrorKind::Validation,
            SignupError::UserStoreError(e) => e.kind(),
            SignupError::UnexpectedError(_) => ErrorKind::Internal,
        }
    }
}

// Losing the race against a concurrent signup is still a duplicate
impl From<UserStoreError> for SignupError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => SignupError::AlreadyExists,
            other => SignupError::UserStoreError(other),
        }
    }
}

/// Signup use case - handles user registration
pub struct SignupUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> SignupUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// Execute the signup use case
    ///
    /// The existence check and the insert are separate store calls. Two
    /// concurrent signups for the same name can both pass the check; the
    /// store's own uniqueness rejection then decides the loser, which gets
    /// `AlreadyExists` like everybody else.
    ///
    /// # Returns
    /// The stored user, or `AlreadyExists`, `Validation` with every reason the
    /// input was rejected, or the store error.
    #[tracing::instrument(name = "SignupUseCase::execute", skip_all, fields(username = %request.username))]
    pub async fn execute(&self, request: SignupRequest) -> Result<User, SignupError> {
        let username = Username::parse(request.username);

        // A name that fails validation cannot be stored, so there is nothing to look up
        if let Ok(username) = &username {
            match self.user_store.get_user_by_username(username).await {
                Ok(_) => return Err(SignupError::AlreadyExists),
                Err(UserStoreError::UserNotFound) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let email = Email::parse(request.email);
        let password_hash = hash_password(request.password).await?;

        let (username, email, password_hash) = match (username, email, password_hash) {
            (Ok(username), Ok(email), Ok(password_hash)) => (username, email, password_hash),
            (username, email, password_hash) => {
                let error = UserError::merge(
                    [username.err(), email.err(), password_hash.err()]
                        .into_iter()
                        .flatten(),
                )
                .ok_or_else(|| SignupError::UnexpectedError("validation failed".to_string()))?;
                return Err(SignupError::Validation(error));
            }
        };

        let user = User::new(username, email, password_hash);
        self.user_store.add_user(user.clone()).await?;

        tracing::info!(user_id = %user.id(), "User signed up");
        Ok(user)
    }
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn hash_password(
    password: Secret<String>,
) -> Result<Result<HashedPassword, UserError>, SignupError> {
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || current_span.in_scope(|| HashedPassword::parse(password)))
        .await
        .map_err(|e| SignupError::UnexpectedError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockStore, stored_user};

    fn request(username: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: Secret::new(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_signup_success() {
        let user_store = MockStore::default();
        let use_case = SignupUseCase::new(&user_store);

        let user = use_case
            .execute(request("alice", "a@example.com", "password1"))
            .await
            .unwrap();

        assert_eq!(user.username().as_str(), "alice");
        assert_eq!(user.email().as_str(), "a@example.com");
        assert!(user.password_hash().verify(&Secret::new("password1".to_string())));

        let stored = user_store.get_user_by_id(&user.id()).await.unwrap();
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let user_store = MockStore::default();
        user_store
            .add_user(stored_user("alice", "a@example.com", "password1"))
            .await
            .unwrap();
        let use_case = SignupUseCase::new(&user_store);

        let result = use_case
            .execute(request("alice", "b@example.com", "password2"))
            .await;

        assert!(matches!(result, Err(SignupError::AlreadyExists)));
        assert_eq!(user_store.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_is_caught_by_store() {
        let user_store = MockStore::default();
        user_store
            .add_user(stored_user("alice", "a@example.com", "password1"))
            .await
            .unwrap();
        let use_case = SignupUseCase::new(&user_store);

        let result = use_case
            .execute(request("bob1", "a@example.com", "password2"))
            .await;

        let error = result.unwrap_err();
        assert!(matches!(error, SignupError::AlreadyExists));
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_signup_reports_every_validation_failure() {
        let user_store = MockStore::default();
        let use_case = SignupUseCase::new(&user_store);

        let result = use_case.execute(request("a!", "nope", "short")).await;

        let Err(SignupError::Validation(error)) = result else {
            panic!("expected a validation error, got {result:?}");
        };
        // too short, bad character, bad email, short password
        assert_eq!(error.reasons().len(), 4);
        assert_eq!(user_store.user_count().await, 0);
    }

    #[tokio::test]
    async fn test_signup_validation_error_kind() {
        let user_store = MockStore::default();
        let use_case = SignupUseCase::new(&user_store);

        let error = use_case
            .execute(request("alice", "a@example.com", "short"))
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.to_string().contains("at least 8 characters"));
    }
}
