use crate::Account;
use crate::Session;
use crate::SessionStore;
use crate::StoreError;
use crate::UserStore;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use teller_core::ID;
use teller_core::Unique;

/// In-process store backing both persistence seams.
///
/// One instance holds accounts and sessions together so the token lookup
/// can join a session to its owning account, mirroring the SQL adapter.
/// Shared as `Arc<Memory>`, the same shape the postgres adapter takes as
/// `Arc<Client>`.
#[derive(Debug, Default)]
pub struct Memory {
    accounts: Mutex<Vec<(Account, String)>>,
    sessions: Mutex<Vec<Session>>,
}

impl UserStore for Arc<Memory> {
    async fn create(&self, account: &Account, hashword: &str) -> Result<(), StoreError> {
        let mut accounts = self.accounts.lock().expect("accounts lock");
        if accounts
            .iter()
            .any(|(held, _)| held.user_id() == account.user_id())
        {
            return Err(StoreError::Conflict);
        }
        accounts.push((account.clone(), hashword.to_string()));
        Ok(())
    }

    async fn lookup(&self, user_id: &str) -> Result<Option<(Account, String)>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .expect("accounts lock")
            .iter()
            .find(|(held, _)| held.user_id() == user_id)
            .cloned())
    }
}

impl SessionStore for Arc<Memory> {
    async fn insert(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().expect("sessions lock");
        if sessions.iter().any(|held| held.token() == session.token()) {
            return Err(StoreError::Conflict);
        }
        sessions.push(session.clone());
        Ok(())
    }

    async fn by_token(&self, token: &str) -> Result<Option<(Session, Account)>, StoreError> {
        let found = self
            .sessions
            .lock()
            .expect("sessions lock")
            .iter()
            .find(|held| held.token().as_str() == token)
            .cloned();
        match found {
            None => Ok(None),
            Some(session) => Ok(self
                .accounts
                .lock()
                .expect("accounts lock")
                .iter()
                .find(|(held, _)| held.id() == session.account())
                .map(|(held, _)| (session.clone(), held.clone()))),
        }
    }

    async fn newest_valid(
        &self,
        account: ID<Account>,
        at: SystemTime,
    ) -> Result<Option<Session>, StoreError> {
        Ok(self
            .sessions
            .lock()
            .expect("sessions lock")
            .iter()
            .filter(|held| held.account() == account)
            .filter(|held| held.valid_at(at))
            .max_by_key(|held| held.started())
            .cloned())
    }

    async fn delete(&self, session: ID<Session>) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .expect("sessions lock")
            .retain(|held| held.id() != session);
        Ok(())
    }
}
