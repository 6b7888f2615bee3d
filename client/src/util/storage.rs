//! `localStorage` backend for the persisted session blob.
//!
//! SYSTEM CONTEXT
//! ==============
//! The blob lives under `marketplace::storage::STORAGE_KEY` so every tab of
//! the same origin shares one session. SSR paths no-op: nothing is ever
//! persisted on the server.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use marketplace::SessionStorage;
#[cfg(feature = "hydrate")]
use marketplace::storage::STORAGE_KEY;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Session storage backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn read_raw(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(STORAGE_KEY).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn write_raw(&self, raw: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("storage: localStorage unavailable, session not persisted");
                return;
            };
            if let Err(e) = storage.set_item(STORAGE_KEY, raw) {
                log::warn!("storage: failed to persist session: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = raw;
        }
    }

    fn remove(&self) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("storage: localStorage unavailable, session not cleared");
                return;
            };
            if let Err(e) = storage.remove_item(STORAGE_KEY) {
                log::warn!("storage: failed to remove session: {e:?}");
            }
        }
    }
}
