//! Accounts, credentials, and opaque session tokens.
//!
//! Password sign-up and sign-in backed by Argon2 hashing, with at most
//! one live session per account: repeat sign-ins inside the validity
//! window hand back the existing token instead of minting another.
//!
//! ## Domain Types
//!
//! - [`Account`] — registered user with a public identifier
//! - [`Session`] — time-bounded grant identified by an opaque [`Token`]
//! - [`SessionInfo`] — validated projection handed to callers
//!
//! ## Capabilities
//!
//! - [`CredentialVerifier`] / [`Argon2id`] — password hashing and checks
//! - [`UserStore`] / [`SessionStore`] — persistence seams
//! - [`Memory`] — in-process store backing both seams
//! - [`SessionManager`] — issuance, reuse, and expiry of sessions
//! - [`Teller`] — sign-up / sign-in composed over the above
//!
//! ## Features
//!
//! - `database` — PostgreSQL store adapters and entity schemas
//! - `server` — actix-web handlers over the deployed [`Gateway`]

mod account;
mod dto;
mod error;
mod memory;
mod password;
mod session;
mod sessions;
mod store;
mod teller;
mod token;

pub use account::*;
pub use dto::*;
pub use error::*;
pub use memory::*;
pub use password::*;
pub use session::*;
pub use sessions::*;
pub use store::*;
pub use teller::*;
pub use token::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
pub use handlers::*;
