//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (loading, submitting, toasts)
//! and delegates rendering details to `components`. Session transitions go
//! through the shared `Session`; marketplace data through `FetchClient`.

pub mod forbidden;
pub mod forgot_password;
pub mod home;
pub mod login;
pub mod messages;
pub mod not_found;
pub mod profile;
pub mod register;
pub mod verify_otp;
