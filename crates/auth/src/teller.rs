use crate::Account;
use crate::AuthError;
use crate::CredentialVerifier;
use crate::SessionInfo;
use crate::SessionManager;
use crate::SessionStore;
use crate::StoreError;
use crate::UserStore;
use std::time::SystemTime;
use teller_core::ID;
use teller_core::Unique;

/// Sign-up and sign-in composed over the three capability seams.
///
/// Concrete adapters are wired in once at construction; nothing below
/// this point reads configuration or global state.
pub struct Teller<U, S, V> {
    users: U,
    sessions: SessionManager<S>,
    verifier: V,
}

impl<U, S, V> Teller<U, S, V>
where
    U: UserStore,
    S: SessionStore,
    V: CredentialVerifier,
{
    pub fn new(users: U, sessions: SessionManager<S>, verifier: V) -> Self {
        Self {
            users,
            sessions,
            verifier,
        }
    }

    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    /// Registers a new account under `user_id`.
    ///
    /// The exists pre-check catches the common duplicate; the store's
    /// uniqueness constraint catches the race, so the loser of a
    /// simultaneous sign-up still sees [`AuthError::Conflict`].
    pub async fn sign_up(&self, user_id: &str, password: &str) -> Result<Account, AuthError> {
        if self.users.exists(user_id).await? {
            return Err(AuthError::Conflict);
        }
        let hashword = self.verifier.hash(password)?;
        let account = Account::new(ID::default(), user_id.to_string(), SystemTime::now());
        match self.users.create(&account, &hashword).await {
            Ok(()) => Ok(account),
            Err(StoreError::Conflict) => Err(AuthError::Conflict),
            Err(e) => Err(AuthError::Store(e)),
        }
    }

    /// Authenticates and returns the live session projection.
    ///
    /// Unknown user_id and wrong password fail identically; callers
    /// cannot tell which half was wrong. The projection is re-read from
    /// the store after issuance, so a session that cannot be read back
    /// surfaces as [`AuthError::Session`].
    pub async fn sign_in(&self, user_id: &str, password: &str) -> Result<SessionInfo, AuthError> {
        let (account, hashword) = match self.users.lookup(user_id).await? {
            Some(found) => found,
            None => return Err(AuthError::Unauthorized),
        };
        if !self.verifier.verify(password, &hashword) {
            return Err(AuthError::Unauthorized);
        }
        let token = self.sessions.create_session(account.id()).await?;
        self.sessions
            .session_info(token.as_str())
            .await?
            .ok_or(AuthError::Session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Argon2id;
    use crate::HashError;
    use crate::Memory;
    use std::sync::Arc;
    use std::time::Duration;

    /// Identity "hash" so scenario tests skip the cost of Argon2.
    struct Plain;

    impl CredentialVerifier for Plain {
        fn hash(&self, password: &str) -> Result<String, HashError> {
            Ok(password.to_string())
        }
        fn verify(&self, password: &str, hashword: &str) -> bool {
            password == hashword
        }
    }

    fn teller() -> Teller<Arc<Memory>, Arc<Memory>, Plain> {
        let store = Arc::new(Memory::default());
        Teller::new(
            store.clone(),
            SessionManager::new(store, Duration::from_secs(3600)),
            Plain,
        )
    }

    #[tokio::test]
    async fn sign_up_then_duplicate_conflicts() {
        let teller = teller();
        let account = teller.sign_up("alice", "pw1").await.unwrap();
        assert_eq!(account.user_id(), "alice");
        let err = teller.sign_up("alice", "pw2").await.unwrap_err();
        assert_eq!(err, AuthError::Conflict);
    }

    #[tokio::test]
    async fn sign_in_returns_live_session() {
        let teller = teller();
        teller.sign_up("alice", "pw1").await.unwrap();
        let info = teller.sign_in("alice", "pw1").await.unwrap();
        assert!(!info.token.is_empty());
        assert_eq!(info.user_id, "alice");
        assert_eq!(info.max_time, info.start_time + Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_alike() {
        let teller = teller();
        teller.sign_up("alice", "pw1").await.unwrap();
        let wrong = teller.sign_in("alice", "nope").await.unwrap_err();
        let unknown = teller.sign_in("bob", "whatever").await.unwrap_err();
        assert_eq!(wrong, AuthError::Unauthorized);
        assert_eq!(wrong, unknown);
    }

    #[tokio::test]
    async fn repeat_sign_ins_share_one_token() {
        let teller = teller();
        teller.sign_up("alice", "pw1").await.unwrap();
        let first = teller.sign_in("alice", "pw1").await.unwrap();
        let second = teller.sign_in("alice", "pw1").await.unwrap();
        assert_eq!(first.token, second.token);
        assert_eq!(first.max_time, second.max_time);
    }

    // No lock spans the check-then-insert window, so racing sign-ins may
    // mint two live sessions for one account. Both grants must still
    // validate; token equality is not promised.
    #[tokio::test]
    async fn concurrent_sign_ins_both_yield_live_tokens() {
        let teller = Arc::new(teller());
        teller.sign_up("alice", "pw1").await.unwrap();
        let (one, two) = tokio::join!(
            teller.sign_in("alice", "pw1"),
            teller.sign_in("alice", "pw1"),
        );
        for info in [one.unwrap(), two.unwrap()] {
            let live = teller
                .sessions()
                .session_info(&info.token)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(live.user_id, "alice");
        }
    }

    #[tokio::test]
    async fn argon2_end_to_end() {
        let store = Arc::new(Memory::default());
        let teller = Teller::new(
            store.clone(),
            SessionManager::new(store, Duration::from_secs(3600)),
            Argon2id,
        );
        teller.sign_up("alice", "hunter2").await.unwrap();
        assert!(teller.sign_in("alice", "hunter2").await.is_ok());
        assert_eq!(
            teller.sign_in("alice", "wrong").await.unwrap_err(),
            AuthError::Unauthorized,
        );
    }
}
