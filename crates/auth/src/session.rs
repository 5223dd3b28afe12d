use crate::Account;
use crate::Token;
use std::time::Duration;
use std::time::SystemTime;
use teller_core::ID;
use teller_core::Unique;

/// Persisted authorization grant, immutable once issued.
///
/// Carries its account's key rather than the whole record; reads that
/// need the public user_id join through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: ID<Self>,
    account: ID<Account>,
    token: Token,
    started: SystemTime,
    expires: SystemTime,
}

impl Session {
    pub fn new(
        id: ID<Self>,
        account: ID<Account>,
        token: Token,
        started: SystemTime,
        expires: SystemTime,
    ) -> Self {
        Self {
            id,
            account,
            token,
            started,
            expires,
        }
    }

    /// Mints a fresh grant starting at `at` and expiring `ttl` later.
    pub fn issue(account: ID<Account>, at: SystemTime, ttl: Duration) -> Self {
        Self::new(ID::default(), account, Token::default(), at, at + ttl)
    }

    pub fn account(&self) -> ID<Account> {
        self.account
    }
    pub fn token(&self) -> &Token {
        &self.token
    }
    pub fn started(&self) -> SystemTime {
        self.started
    }
    pub fn expires(&self) -> SystemTime {
        self.expires
    }

    /// Alive strictly before `expires`; dead at the boundary instant
    /// itself and ever after.
    pub fn valid_at(&self, at: SystemTime) -> bool {
        self.expires > at
    }
}

impl Unique for Session {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use teller_pg::*;

    impl Schema for Session {
        fn name() -> &'static str {
            SESSIONS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                SESSIONS,
                " (
                id          UUID PRIMARY KEY,
                account_id  UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                token       TEXT UNIQUE NOT NULL,
                started_at  TIMESTAMPTZ NOT NULL,
                expires_at  TIMESTAMPTZ NOT NULL
            );"
            )
        }
        // account_id carries no unique constraint: racing sign-ins can
        // leave duplicate live sessions for one account.
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_sessions_account ON ",
                SESSIONS,
                " (account_id);
                 CREATE INDEX IF NOT EXISTS idx_sessions_token ON ",
                SESSIONS,
                " (token);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_sets_window_from_instant() {
        let at = SystemTime::now();
        let session = Session::issue(ID::default(), at, Duration::from_secs(3600));
        assert_eq!(session.started(), at);
        assert_eq!(session.expires(), at + Duration::from_secs(3600));
    }

    #[test]
    fn valid_strictly_before_expiry() {
        let at = SystemTime::now();
        let session = Session::issue(ID::default(), at, Duration::from_secs(3600));
        assert!(session.valid_at(at));
        assert!(session.valid_at(at + Duration::from_secs(3599)));
    }

    #[test]
    fn invalid_from_expiry_onward() {
        let at = SystemTime::now();
        let session = Session::issue(ID::default(), at, Duration::from_secs(3600));
        assert!(!session.valid_at(at + Duration::from_secs(3600)));
        assert!(!session.valid_at(at + Duration::from_secs(7200)));
    }
}
