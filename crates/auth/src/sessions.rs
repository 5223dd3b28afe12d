use crate::Account;
use crate::Session;
use crate::SessionStore;
use crate::StoreError;
use crate::Token;
use std::time::Duration;
use std::time::SystemTime;
use teller_core::ID;

/// Validated view of a live session, carrying the public user_id of its
/// owner rather than the internal account key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub token: String,
    pub user_id: String,
    pub start_time: SystemTime,
    pub max_time: SystemTime,
}

/// Issues and validates session tokens over a [`SessionStore`].
///
/// One live session per account: repeat requests inside the validity
/// window hand back the existing token untouched. Expiry is lazy; nothing
/// sweeps dead rows, they simply stop validating.
pub struct SessionManager<S> {
    store: S,
    ttl: Duration,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Returns a token for `account`: the current one if a live session
    /// exists, a fresh one otherwise.
    ///
    /// The clock is read once up front; lookup, validity, and the fresh
    /// window all run off that single instant. Reuse never extends the
    /// window — a reissued token keeps the expiry it was born with. No
    /// lock spans the lookup and the insert, so racing calls can both
    /// mint.
    pub async fn create_session(&self, account: ID<Account>) -> Result<Token, StoreError> {
        let now = SystemTime::now();
        match self.store.newest_valid(account, now).await? {
            Some(live) => Ok(live.token().clone()),
            None => {
                let fresh = Session::issue(account, now, self.ttl);
                self.store.insert(&fresh).await?;
                Ok(fresh.token().clone())
            }
        }
    }

    /// Projects the session behind `token`, or `None` when the token is
    /// unknown or the session has expired. Expired is absence, not error.
    pub async fn session_info(&self, token: &str) -> Result<Option<SessionInfo>, StoreError> {
        let now = SystemTime::now();
        Ok(self
            .store
            .by_token(token)
            .await?
            .filter(|(session, _)| session.valid_at(now))
            .map(|(session, account)| SessionInfo {
                token: session.token().to_string(),
                user_id: account.user_id().to_string(),
                start_time: session.started(),
                max_time: session.expires(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Memory;
    use crate::UserStore;
    use std::sync::Arc;
    use teller_core::Unique;

    fn manager() -> (Arc<Memory>, SessionManager<Arc<Memory>>) {
        let store = Arc::new(Memory::default());
        let manager = SessionManager::new(store.clone(), Duration::from_secs(3600));
        (store, manager)
    }

    #[tokio::test]
    async fn repeat_calls_reuse_the_live_token() {
        let (_, manager) = manager();
        let account = ID::default();
        let first = manager.create_session(account).await.unwrap();
        let second = manager.create_session(account).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn reuse_leaves_expiry_untouched() {
        let (store, manager) = manager();
        let account = ID::default();
        let token = manager.create_session(account).await.unwrap();
        let now = SystemTime::now();
        let before = store.newest_valid(account, now).await.unwrap().unwrap();
        manager.create_session(account).await.unwrap();
        let after = store.newest_valid(account, now).await.unwrap().unwrap();
        assert_eq!(before.expires(), after.expires());
        assert_eq!(&token, after.token());
    }

    #[tokio::test]
    async fn expired_session_gets_replaced() {
        let (store, manager) = manager();
        let account = ID::default();
        let now = SystemTime::now();
        let stale = Session::new(
            ID::default(),
            account,
            Token::default(),
            now - Duration::from_secs(7200),
            now - Duration::from_secs(3600),
        );
        store.insert(&stale).await.unwrap();
        let fresh = manager.create_session(account).await.unwrap();
        assert_ne!(&fresh, stale.token());
    }

    #[tokio::test]
    async fn info_projects_public_user_id() {
        let (store, manager) = manager();
        let alice = Account::new(ID::default(), "alice".to_string(), SystemTime::now());
        store.create(&alice, "hashword").await.unwrap();
        let token = manager.create_session(alice.id()).await.unwrap();
        let info = manager.session_info(token.as_str()).await.unwrap().unwrap();
        assert_eq!(info.token, token.to_string());
        assert_eq!(info.user_id, "alice");
        assert_eq!(info.max_time, info.start_time + Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn info_absent_for_unknown_token() {
        let (_, manager) = manager();
        assert!(
            manager
                .session_info("no-such-token")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn info_absent_for_expired_session() {
        let (store, manager) = manager();
        let alice = Account::new(ID::default(), "alice".to_string(), SystemTime::now());
        store.create(&alice, "hashword").await.unwrap();
        let now = SystemTime::now();
        let stale = Session::new(
            ID::default(),
            alice.id(),
            Token::default(),
            now - Duration::from_secs(7200),
            now - Duration::from_secs(3600),
        );
        store.insert(&stale).await.unwrap();
        assert!(
            manager
                .session_info(stale.token().as_str())
                .await
                .unwrap()
                .is_none()
        );
    }
}
