//! Networking for the browser client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `fetch` supplies the `gloo-net` transport behind the shared
//! `marketplace::fetch::FetchClient` and `marketplace::api::RestAuthApi`.

pub mod fetch;
