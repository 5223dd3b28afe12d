use crate::Account;
use crate::Session;
use crate::StoreError;
use std::time::SystemTime;
use teller_core::ID;

/// Durable mapping from public user_id to account and credential hash.
#[allow(async_fn_in_trait)]
pub trait UserStore {
    /// Inserts a new account. The user_id uniqueness constraint is the
    /// arbiter: losing a race still yields [`StoreError::Conflict`].
    async fn create(&self, account: &Account, hashword: &str) -> Result<(), StoreError>;
    /// Exact-match lookup returning the account and its stored hashword.
    async fn lookup(&self, user_id: &str) -> Result<Option<(Account, String)>, StoreError>;
    /// Convenience predicate on top of [`UserStore::lookup`].
    async fn exists(&self, user_id: &str) -> Result<bool, StoreError> {
        self.lookup(user_id).await.map(|found| found.is_some())
    }
}

/// Durable mapping from opaque token to session record.
#[allow(async_fn_in_trait)]
pub trait SessionStore {
    /// Persists a freshly issued session. Token uniqueness is enforced
    /// here; a collision surfaces as [`StoreError::Conflict`].
    async fn insert(&self, session: &Session) -> Result<(), StoreError>;
    /// Exact token match, joined with the owning account so callers can
    /// project the public user_id without a second query.
    async fn by_token(&self, token: &str) -> Result<Option<(Session, Account)>, StoreError>;
    /// Most recently started session for `account` still valid at `at`.
    /// Start time descending, so leftover duplicates resolve to the
    /// newest grant deterministically.
    async fn newest_valid(
        &self,
        account: ID<Account>,
        at: SystemTime,
    ) -> Result<Option<Session>, StoreError>;
    /// Removes a session outright. Expiry never calls this; dead rows
    /// stay put until something deletes them explicitly.
    async fn delete(&self, session: ID<Session>) -> Result<(), StoreError>;
}

#[cfg(feature = "database")]
mod postgres {
    use super::*;
    use crate::Token;
    use std::sync::Arc;
    use teller_core::Unique;
    use teller_pg::*;
    use tokio_postgres::Client;
    use tokio_postgres::Row;

    fn account_from(row: &Row, offset: usize) -> Account {
        Account::new(
            ID::from(row.get::<_, uuid::Uuid>(offset)),
            row.get::<_, String>(offset + 1),
            row.get::<_, SystemTime>(offset + 2),
        )
    }

    fn session_from(row: &Row) -> Session {
        Session::new(
            ID::from(row.get::<_, uuid::Uuid>(0)),
            ID::from(row.get::<_, uuid::Uuid>(1)),
            Token::from(row.get::<_, String>(2)),
            row.get::<_, SystemTime>(3),
            row.get::<_, SystemTime>(4),
        )
    }

    impl UserStore for Arc<Client> {
        async fn create(&self, account: &Account, hashword: &str) -> Result<(), StoreError> {
            self.execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    USERS,
                    " (id, user_id, hashword, created_at) VALUES ($1, $2, $3, $4)"
                ),
                &[
                    &account.id().inner(),
                    &account.user_id(),
                    &hashword,
                    &account.created(),
                ],
            )
            .await
            .map(|_| ())
            .map_err(StoreError::from)
        }

        async fn lookup(&self, user_id: &str) -> Result<Option<(Account, String)>, StoreError> {
            self.query_opt(
                const_format::concatcp!(
                    "SELECT id, user_id, created_at, hashword FROM ",
                    USERS,
                    " WHERE user_id = $1"
                ),
                &[&user_id],
            )
            .await
            .map(|opt| opt.map(|row| (account_from(&row, 0), row.get::<_, String>(3))))
            .map_err(StoreError::from)
        }
    }

    impl SessionStore for Arc<Client> {
        async fn insert(&self, session: &Session) -> Result<(), StoreError> {
            self.execute(
                const_format::concatcp!(
                    "INSERT INTO ",
                    SESSIONS,
                    " (id, account_id, token, started_at, expires_at)",
                    " VALUES ($1, $2, $3, $4, $5)"
                ),
                &[
                    &session.id().inner(),
                    &session.account().inner(),
                    &session.token().as_str(),
                    &session.started(),
                    &session.expires(),
                ],
            )
            .await
            .map(|_| ())
            .map_err(StoreError::from)
        }

        async fn by_token(&self, token: &str) -> Result<Option<(Session, Account)>, StoreError> {
            self.query_opt(
                const_format::concatcp!(
                    "SELECT s.id, s.account_id, s.token, s.started_at, s.expires_at,",
                    " u.id, u.user_id, u.created_at FROM ",
                    SESSIONS,
                    " s JOIN ",
                    USERS,
                    " u ON u.id = s.account_id WHERE s.token = $1"
                ),
                &[&token],
            )
            .await
            .map(|opt| opt.map(|row| (session_from(&row), account_from(&row, 5))))
            .map_err(StoreError::from)
        }

        async fn newest_valid(
            &self,
            account: ID<Account>,
            at: SystemTime,
        ) -> Result<Option<Session>, StoreError> {
            self.query_opt(
                const_format::concatcp!(
                    "SELECT id, account_id, token, started_at, expires_at FROM ",
                    SESSIONS,
                    " WHERE account_id = $1 AND expires_at > $2",
                    " ORDER BY started_at DESC LIMIT 1"
                ),
                &[&account.inner(), &at],
            )
            .await
            .map(|opt| opt.map(|row| session_from(&row)))
            .map_err(StoreError::from)
        }

        async fn delete(&self, session: ID<Session>) -> Result<(), StoreError> {
            self.execute(
                const_format::concatcp!("DELETE FROM ", SESSIONS, " WHERE id = $1"),
                &[&session.inner()],
            )
            .await
            .map(|_| ())
            .map_err(StoreError::from)
        }
    }
}
