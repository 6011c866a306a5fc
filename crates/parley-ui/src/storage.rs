use parley_types::{Session, TokenStore, TOKEN_KEY};

/// Token persisted in the browser's `localStorage` under a fixed key.
///
/// Outside the browser every read misses and every write is dropped.
#[derive(Clone, Debug)]
pub struct LocalStorageTokenStore {
    key: String,
}

impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalStorageTokenStore {
    fn default() -> Self {
        Self::new(TOKEN_KEY)
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(feature = "csr")]
impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) {
        let Some(storage) = local_storage() else {
            tracing::warn!("localStorage unavailable, token not persisted");
            return;
        };
        if let Err(e) = storage.set_item(&self.key, token) {
            tracing::warn!("failed to persist token: {e:?}");
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(&self.key) {
                tracing::warn!("failed to clear token: {e:?}");
            }
        }
    }
}

#[cfg(not(feature = "csr"))]
impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        None
    }

    fn save(&self, _token: &str) {}

    fn clear(&self) {}
}

/// Session backed by the browser's persisted token.
pub fn browser_session() -> Session {
    Session::new(LocalStorageTokenStore::default())
}
