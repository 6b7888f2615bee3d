//! Session lifecycle, route guarding, and REST wire types for the
//! classifieds marketplace front ends.
//!
//! This crate owns the logic shared by `client` (browser) and `cli` (native).
//! It performs no I/O itself: transport, durable storage, and UI side effects
//! are injected through the [`AuthApi`], [`SessionStorage`], and
//! [`SessionEvents`] seams so each front end supplies its own.
//!
//! ARCHITECTURE
//! ============
//! `session` is the single source of truth for who is signed in. `guard`
//! turns a session snapshot plus a route's requirements into a render or
//! redirect decision. `rbac` holds the closed role/permission table both of
//! them consult.

pub mod api;
pub mod error;
pub mod events;
pub mod fetch;
pub mod guard;
pub mod market;
pub mod models;
pub mod rbac;
pub mod routes;
pub mod session;
pub mod storage;
pub mod user;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use api::AuthApi;
pub use error::AuthError;
pub use events::{Notice, NoticeKind, SessionEvents};
pub use guard::{GuardDecision, Redirect, RouteRequirements};
pub use rbac::{AccountType, Permission, Role};
pub use session::{Session, SessionSnapshot, SessionStatus};
pub use storage::{MemoryStorage, SessionStorage, StoredSession};
pub use user::{AuthUser, LoginResponse, SignUpPayload, TokenPair};
