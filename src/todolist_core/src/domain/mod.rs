use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to whole seconds.
///
/// Entities are stamped at construction with this so that every backend,
/// including the relational one that keeps epoch seconds, reads back the
/// exact same value it was given.
pub fn now_in_seconds() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            pub fn parse(id: &str) -> Result<Self, uuid::Error> {
                uuid::Uuid::parse_str(id).map(Self)
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

pub mod email;
pub mod password;
pub mod session;
pub mod todo;
pub mod user;
pub mod username;
