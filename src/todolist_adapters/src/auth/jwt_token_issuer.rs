use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use todolist_core::{
    SessionClaims, SessionToken, TokenError, TokenIssuer, User, UserId,
    domain::session::DEFAULT_SESSION_TTL_SECONDS,
};

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn new(jwt_secret: Secret<String>) -> Self {
        Self {
            jwt_secret,
            token_ttl_in_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues HS256-signed session tokens and checks them again on the way back.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtAuthConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtAuthConfig) -> Self {
        Self { config }
    }

    fn claims_for(&self, user: &User) -> Result<Claims, TokenError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            TokenError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(delta)
            .ok_or(TokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?;

        Ok(Claims {
            sub: user.id().to_string(),
            username: user.username().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    #[tracing::instrument(name = "Issuing session token", skip_all)]
    fn issue(&self, user: &User) -> Result<SessionToken, TokenError> {
        let claims = self.claims_for(user)?;
        create_token(&claims, self.config.as_bytes()).map(SessionToken::new)
    }

    #[tracing::instrument(name = "Verifying session token", skip_all)]
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidToken(e.to_string()),
        })?;

        Ok(SessionClaims {
            user_id: UserId::parse(&claims.sub)
                .map_err(|e| TokenError::InvalidToken(e.to_string()))?,
            username: claims.username,
            issued_at: from_epoch(claims.iat)?,
            expires_at: from_epoch(claims.exp)?,
        })
    }
}

fn create_token(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
        .map_err(|e| TokenError::UnexpectedError(e.to_string()))
}

fn from_epoch(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| TokenError::InvalidToken(format!("timestamp out of range: {seconds}")))
}

#[cfg(test)]
mod tests {
    use todolist_core::{Email, HashedPassword, Username};

    use super::*;

    fn config() -> JwtAuthConfig {
        JwtAuthConfig::new(Secret::new("secret".to_owned()))
    }

    fn user() -> User {
        User::new(
            Username::parse("alice").unwrap(),
            Email::parse("a@example.com").unwrap(),
            HashedPassword::parse(Secret::new("password1".to_owned())).unwrap(),
        )
    }

    #[test]
    fn test_issue_then_verify() {
        let issuer = JwtTokenIssuer::new(config());
        let user = user();

        let token = issuer.issue(&user).unwrap();
        assert_eq!(token.expose().split('.').count(), 3);

        let claims = issuer.verify(token.expose()).unwrap();
        assert_eq!(claims.user_id, user.id());
        assert_eq!(claims.username, "alice");
        assert_eq!(
            (claims.expires_at - claims.issued_at).num_seconds(),
            DEFAULT_SESSION_TTL_SECONDS
        );
    }

    #[test]
    fn test_configured_ttl_is_used() {
        let mut config = config();
        config.token_ttl_in_seconds = 600;
        let issuer = JwtTokenIssuer::new(config);

        let token = issuer.issue(&user()).unwrap();
        let claims = issuer.verify(token.expose()).unwrap();
        assert_eq!((claims.expires_at - claims.issued_at).num_seconds(), 600);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtTokenIssuer::new(config());
        let other = JwtTokenIssuer::new(JwtAuthConfig::new(Secret::new("other".to_owned())));

        let token = other.issue(&user()).unwrap();
        assert!(matches!(
            issuer.verify(token.expose()),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let issuer = JwtTokenIssuer::new(config());
        assert!(matches!(
            issuer.verify("not.a.token"),
            Err(TokenError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let config = config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: UserId::new().to_string(),
            username: "alice".to_owned(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = create_token(&claims, config.as_bytes()).unwrap();

        let issuer = JwtTokenIssuer::new(config);
        assert!(matches!(issuer.verify(&token), Err(TokenError::Expired)));
    }
}
