//! Simulated identity and user-management backend.

pub mod models;
pub mod query;
pub mod seed;
mod store;

pub use models::{PublicUser, Role, Session, UserId, UserRecord, UserStatus};
pub use query::{Page, UserQuery};
pub use store::MockBackend;
