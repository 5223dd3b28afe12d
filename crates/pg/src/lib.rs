//! PostgreSQL connectivity and schema management.
//!
//! ## Connectivity
//!
//! - [`db()`] — connects and hands back a shared [`Client`]
//!
//! ## Schema
//!
//! - [`Schema`] — DDL ownership for persisted entities
//! - [`ensure()`] — idempotent table and index creation at startup
//!
//! Table name constants live here so every crate assembling SQL against
//! them shares one spelling.

use std::sync::Arc;
use tokio_postgres::Client;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:    &str = "users";
/// Table for issued login sessions.
#[rustfmt::skip]
pub const SESSIONS: &str = "sessions";

/// Schema metadata for a persisted entity.
///
/// DDL strings are `&'static str`, assembled at compile time with
/// `const_format::concatcp!` in the implementing crate, so the table name
/// constants above stay the single source of truth.
pub trait Schema {
    /// Table name in the database.
    fn name() -> &'static str;
    /// `CREATE TABLE IF NOT EXISTS` statement.
    fn creates() -> &'static str;
    /// `CREATE INDEX IF NOT EXISTS` statements.
    fn indices() -> &'static str;
}

/// Connects to PostgreSQL and spawns the connection driver task.
///
/// Takes the connection URL from the caller; configuration ownership
/// stays with the binary.
pub async fn db(url: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls).await?;
    tokio::spawn(connection);
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// Creates `T`'s table and indices if they do not exist yet.
///
/// Startup runs this once per entity, in foreign key order.
pub async fn ensure<T: Schema>(client: &Client) -> Result<(), PgErr> {
    log::debug!("ensuring table ({})", T::name());
    client.batch_execute(T::creates()).await?;
    client.batch_execute(T::indices()).await?;
    Ok(())
}
