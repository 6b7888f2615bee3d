//! Client-side reactive state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` mirrors the shared session into signals; `toast` holds the
//! notification queue. Both are provided via Leptos context from `app`.

pub mod auth;
pub mod toast;
