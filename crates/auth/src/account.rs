use std::time::SystemTime;
use teller_core::ID;
use teller_core::Unique;

/// Registered user identity.
///
/// The Argon2 hashword is a database column, not part of the domain type;
/// store lookups hand it back alongside as a separate string so it never
/// rides along into projections or logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: ID<Self>,
    user_id: String,
    created: SystemTime,
}

impl Account {
    pub fn new(id: ID<Self>, user_id: String, created: SystemTime) -> Self {
        Self {
            id,
            user_id,
            created,
        }
    }

    /// Caller-facing identifier, unique across the user base.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn created(&self) -> SystemTime {
        self.created
    }
}

impl Unique for Account {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use teller_pg::*;

    impl Schema for Account {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                id          UUID PRIMARY KEY,
                user_id     VARCHAR(64) UNIQUE NOT NULL,
                hashword    TEXT NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL
            );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_user_id ON ",
                USERS,
                " (user_id);"
            )
        }
    }
}
