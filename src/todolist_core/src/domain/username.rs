use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::UserError;

pub const MIN_USERNAME_LENGTH: usize = 4;
pub const MAX_USERNAME_LENGTH: usize = 16;

/// A validated username: 4 to 16 letters or digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validates a raw username.
    ///
    /// Both length rules are checked and reported together. The character
    /// check stops at the first character that is neither a letter nor a digit.
    pub fn parse(raw: impl Into<String>) -> Result<Self, UserError> {
        let raw = raw.into();
        let mut reasons = Vec::with_capacity(3);
        let length = raw.chars().count();

        if length < MIN_USERNAME_LENGTH {
            reasons.push(format!(
                "Username must be at least {MIN_USERNAME_LENGTH} characters"
            ));
        }

        if length > MAX_USERNAME_LENGTH {
            reasons.push(format!(
                "Username must be at most {MAX_USERNAME_LENGTH} characters"
            ));
        }

        if let Some(offending) = raw.chars().find(|c| !c.is_alphanumeric()) {
            reasons.push(format!(
                "Username must only contain letters and numbers, found {offending:?}"
            ));
        }

        match UserError::from_reasons(reasons) {
            Some(error) => Err(error),
            None => Ok(Self(raw)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
