/// Failures the storage seams can produce.
///
/// Both the postgres adapters and the in-memory store speak this type, so
/// nothing above the seam ever sees a driver error directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("record already exists")]
    Conflict,
    /// The backing store failed out from under us.
    #[error("store unavailable: {0}")]
    Backend(String),
}

#[cfg(feature = "database")]
impl From<teller_pg::PgErr> for StoreError {
    fn from(e: teller_pg::PgErr) -> Self {
        use tokio_postgres::error::SqlState;
        if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            Self::Conflict
        } else {
            Self::Backend(e.to_string())
        }
    }
}

/// Credential hashing failed.
///
/// Carries no detail: the cause is environmental (salt generation,
/// parameter setup), never the password itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("credential hashing failed")]
pub struct HashError;

/// Gateway-level failure taxonomy.
///
/// Display strings double as the wire messages, so the two sign-in
/// rejections stay word-for-word identical by construction.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Sign-up under a user_id that is already taken.
    #[error("User already exists")]
    Conflict,
    /// Unknown user_id or wrong password; deliberately indistinguishable.
    #[error("Invalid user_id or password")]
    Unauthorized,
    /// A session was created but could not be read back.
    #[error("Failed to create session")]
    Session,
    #[error(transparent)]
    Hashing(#[from] HashError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
