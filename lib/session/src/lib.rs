//! Session management for the classhub server.
//!
//! A session is the only authentication signal in the system: a request is
//! authenticated if and only if its session carries a user. Sessions are
//! modeled as an explicit two-state machine:
//!
//! - `Anonymous` -> `Authenticated` on successful completion of the OAuth
//!   callback (the single forward transition)
//! - `Authenticated` -> gone on logout (the session record is destroyed)
//!
//! Sessions live in an in-memory store keyed by an opaque cookie-carried id.
//! Nothing is persisted past the process lifetime.

pub mod error;
pub mod session;
pub mod store;
pub mod user;

pub use error::SessionStoreError;
pub use session::{Session, SessionId, SessionState};
pub use store::SessionStore;
pub use user::User;
