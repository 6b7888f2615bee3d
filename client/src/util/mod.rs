//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns from page and component logic so
//! the rest of the crate compiles and tests without a DOM.

pub mod storage;
