//! Lightweight preference storage contracts and adapters.
//!
//! Settings, timer, and mixer snapshots persist here as JSON text per
//! versioned key. Last write wins; all mutation happens on the UI thread.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for lightweight preference values (JSON stored as text per key).
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Saves a raw JSON string for a preference key.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Deletes a preference key.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

/// Loads and deserializes a typed preference through any [`PrefsStore`].
///
/// # Errors
///
/// Returns an error when the underlying load fails or the stored JSON does not
/// deserialize into `T`.
pub async fn load_pref_with<T: DeserializeOwned>(
    store: &dyn PrefsStore,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| format!("pref `{key}` deserialize failed: {err}"))
}

/// Serializes and saves a typed preference through any [`PrefsStore`].
///
/// # Errors
///
/// Returns an error when serialization or the underlying save fails.
pub async fn save_pref_with<T: Serialize>(
    store: &dyn PrefsStore,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value)
        .map_err(|err| format!("pref `{key}` serialize failed: {err}"))?;
    store.save_pref(key, &raw).await
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for unsupported targets and baseline tests.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        volume: u8,
    }

    #[test]
    fn typed_round_trip_through_memory_store() {
        let store = MemoryPrefsStore::default();
        block_on(save_pref_with(&store, "test.sample.v1", &Sample { volume: 70 }))
            .expect("save");
        let loaded: Option<Sample> =
            block_on(load_pref_with(&store, "test.sample.v1")).expect("load");
        assert_eq!(loaded, Some(Sample { volume: 70 }));
    }

    #[test]
    fn malformed_stored_json_is_an_error_not_a_panic() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref("test.sample.v1", "not json")).expect("save raw");
        let loaded = block_on(load_pref_with::<Sample>(&store, "test.sample.v1"));
        assert!(loaded.is_err());
    }
}
