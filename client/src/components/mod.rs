//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render application chrome (navbar, toasts, route guard) and
//! shared presentation pieces, reading session state from Leptos context.

pub mod listing_card;
pub mod navbar;
pub mod protected_route;
pub mod toaster;
