//! Remote document-storage boundary contracts.
//!
//! Notes and todos are owner-scoped documents in named collections. The store
//! exposes a query-by-owner read ordered by recency, write operations, and a
//! live-subscription mode that pushes the refreshed result set whenever the
//! collection changes. Failed writes are abandoned by callers (no retry policy
//! anywhere in the system).

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::time::next_monotonic_timestamp_ms;

/// Collection name for markdown notes.
pub const NOTES_COLLECTION: &str = "notes";
/// Collection name for todo items.
pub const TODOS_COLLECTION: &str = "todos";

/// Object-safe boxed future used by [`DocumentStore`] async methods.
pub type DocumentFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Document-storage boundary failures.
pub enum DocumentError {
    /// The referenced document does not exist (or belongs to another owner).
    #[error("document not found")]
    NotFound,
    /// Any other backend failure, reduced to a user-presentable message.
    #[error("saving failed, please try again")]
    Backend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One owner-scoped document.
pub struct DocumentRecord {
    /// Backend-assigned document id.
    pub id: String,
    /// Owning user id.
    pub owner_uid: String,
    /// Collection this document lives in.
    pub collection: String,
    /// App-defined JSON payload.
    pub payload: Value,
    /// Last modification time in unix milliseconds; drives recency ordering.
    pub updated_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Payload replacement for an existing document.
pub struct DocumentPatch {
    /// New JSON payload.
    pub payload: Value,
}

/// Handle keeping a live collection subscription alive.
///
/// Dropping the handle (or calling [`DocumentSubscription::unsubscribe`])
/// detaches the listener; widgets unsubscribe when their window closes or the
/// user signs out.
pub struct DocumentSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl DocumentSubscription {
    /// Wraps a cancellation closure.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Detaches the listener immediately.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for DocumentSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Callback receiving the refreshed, recency-ordered result set.
pub type DocumentListener = Rc<dyn Fn(Vec<DocumentRecord>)>;

/// Host service for the third-party document-storage boundary.
pub trait DocumentStore {
    /// Lists an owner's documents in a collection, most recently updated first.
    fn list<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
    ) -> DocumentFuture<'a, Result<Vec<DocumentRecord>, DocumentError>>;

    /// Creates a document and returns the stored record.
    fn create<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
        payload: Value,
    ) -> DocumentFuture<'a, Result<DocumentRecord, DocumentError>>;

    /// Replaces a document's payload.
    fn update<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
        id: &'a str,
        patch: DocumentPatch,
    ) -> DocumentFuture<'a, Result<DocumentRecord, DocumentError>>;

    /// Deletes a document.
    fn delete<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
        id: &'a str,
    ) -> DocumentFuture<'a, Result<(), DocumentError>>;

    /// Subscribes to live updates for an owner's collection.
    ///
    /// The listener fires once with the current result set and again after
    /// every remote change until the subscription is dropped.
    fn subscribe(
        &self,
        collection: &str,
        owner_uid: &str,
        listener: DocumentListener,
    ) -> DocumentSubscription;
}

#[derive(Debug, Clone, Copy, Default)]
/// Document store that holds nothing and fails every write.
pub struct NoopDocumentStore;

impl DocumentStore for NoopDocumentStore {
    fn list<'a>(
        &'a self,
        _collection: &'a str,
        _owner_uid: &'a str,
    ) -> DocumentFuture<'a, Result<Vec<DocumentRecord>, DocumentError>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn create<'a>(
        &'a self,
        _collection: &'a str,
        _owner_uid: &'a str,
        _payload: Value,
    ) -> DocumentFuture<'a, Result<DocumentRecord, DocumentError>> {
        Box::pin(async { Err(DocumentError::Backend) })
    }

    fn update<'a>(
        &'a self,
        _collection: &'a str,
        _owner_uid: &'a str,
        _id: &'a str,
        _patch: DocumentPatch,
    ) -> DocumentFuture<'a, Result<DocumentRecord, DocumentError>> {
        Box::pin(async { Err(DocumentError::Backend) })
    }

    fn delete<'a>(
        &'a self,
        _collection: &'a str,
        _owner_uid: &'a str,
        _id: &'a str,
    ) -> DocumentFuture<'a, Result<(), DocumentError>> {
        Box::pin(async { Err(DocumentError::Backend) })
    }

    fn subscribe(
        &self,
        _collection: &str,
        _owner_uid: &str,
        _listener: DocumentListener,
    ) -> DocumentSubscription {
        DocumentSubscription::new(|| {})
    }
}

type ListenerMap = HashMap<(String, String), Vec<(u64, DocumentListener)>>;

#[derive(Default)]
struct MemoryDocumentState {
    records: Vec<DocumentRecord>,
    listeners: ListenerMap,
    next_id: u64,
    next_listener_id: u64,
}

#[derive(Clone, Default)]
/// In-memory document store for tests and off-wasm development.
///
/// Implements the same ordering and subscription semantics the remote backend
/// provides: listers/subscribers always observe most-recently-updated first.
pub struct MemoryDocumentStore {
    inner: Rc<RefCell<MemoryDocumentState>>,
}

impl MemoryDocumentStore {
    fn ordered(state: &MemoryDocumentState, collection: &str, owner_uid: &str) -> Vec<DocumentRecord> {
        let mut records: Vec<DocumentRecord> = state
            .records
            .iter()
            .filter(|r| r.collection == collection && r.owner_uid == owner_uid)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.updated_at_ms.cmp(&a.updated_at_ms));
        records
    }

    fn notify(&self, collection: &str, owner_uid: &str) {
        let (snapshot, listeners) = {
            let state = self.inner.borrow();
            let snapshot = Self::ordered(&state, collection, owner_uid);
            let listeners: Vec<DocumentListener> = state
                .listeners
                .get(&(collection.to_string(), owner_uid.to_string()))
                .map(|entries| entries.iter().map(|(_, l)| l.clone()).collect())
                .unwrap_or_default();
            (snapshot, listeners)
        };
        for listener in listeners {
            listener(snapshot.clone());
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn list<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
    ) -> DocumentFuture<'a, Result<Vec<DocumentRecord>, DocumentError>> {
        Box::pin(async move {
            let state = self.inner.borrow();
            Ok(Self::ordered(&state, collection, owner_uid))
        })
    }

    fn create<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
        payload: Value,
    ) -> DocumentFuture<'a, Result<DocumentRecord, DocumentError>> {
        Box::pin(async move {
            let record = {
                let mut state = self.inner.borrow_mut();
                state.next_id += 1;
                let record = DocumentRecord {
                    id: format!("doc-{}", state.next_id),
                    owner_uid: owner_uid.to_string(),
                    collection: collection.to_string(),
                    payload,
                    updated_at_ms: next_monotonic_timestamp_ms(),
                };
                state.records.push(record.clone());
                record
            };
            self.notify(collection, owner_uid);
            Ok(record)
        })
    }

    fn update<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
        id: &'a str,
        patch: DocumentPatch,
    ) -> DocumentFuture<'a, Result<DocumentRecord, DocumentError>> {
        Box::pin(async move {
            let updated = {
                let mut state = self.inner.borrow_mut();
                let record = state
                    .records
                    .iter_mut()
                    .find(|r| r.collection == collection && r.owner_uid == owner_uid && r.id == id)
                    .ok_or(DocumentError::NotFound)?;
                record.payload = patch.payload;
                record.updated_at_ms = next_monotonic_timestamp_ms();
                record.clone()
            };
            self.notify(collection, owner_uid);
            Ok(updated)
        })
    }

    fn delete<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
        id: &'a str,
    ) -> DocumentFuture<'a, Result<(), DocumentError>> {
        Box::pin(async move {
            {
                let mut state = self.inner.borrow_mut();
                let before = state.records.len();
                state.records.retain(|r| {
                    !(r.collection == collection && r.owner_uid == owner_uid && r.id == id)
                });
                if state.records.len() == before {
                    return Err(DocumentError::NotFound);
                }
            }
            self.notify(collection, owner_uid);
            Ok(())
        })
    }

    fn subscribe(
        &self,
        collection: &str,
        owner_uid: &str,
        listener: DocumentListener,
    ) -> DocumentSubscription {
        let key = (collection.to_string(), owner_uid.to_string());
        let listener_id = {
            let mut state = self.inner.borrow_mut();
            state.next_listener_id += 1;
            let listener_id = state.next_listener_id;
            state
                .listeners
                .entry(key.clone())
                .or_default()
                .push((listener_id, listener.clone()));
            listener_id
        };

        // Initial delivery with the current result set.
        let snapshot = {
            let state = self.inner.borrow();
            Self::ordered(&state, collection, owner_uid)
        };
        listener(snapshot);

        let inner = self.inner.clone();
        DocumentSubscription::new(move || {
            let mut state = inner.borrow_mut();
            if let Some(entries) = state.listeners.get_mut(&key) {
                entries.retain(|(id, _)| *id != listener_id);
                if entries.is_empty() {
                    state.listeners.remove(&key);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn list_orders_by_recency_per_owner() {
        let store = MemoryDocumentStore::default();
        let first = block_on(store.create(NOTES_COLLECTION, "u1", json!({"title": "a"})))
            .expect("create");
        let second = block_on(store.create(NOTES_COLLECTION, "u1", json!({"title": "b"})))
            .expect("create");
        block_on(store.create(NOTES_COLLECTION, "u2", json!({"title": "other owner"})))
            .expect("create");

        let listed = block_on(store.list(NOTES_COLLECTION, "u1")).expect("list");
        assert_eq!(
            listed.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec![second.id.as_str(), first.id.as_str()]
        );

        // Updating the older record moves it to the front.
        block_on(store.update(
            NOTES_COLLECTION,
            "u1",
            &first.id,
            DocumentPatch {
                payload: json!({"title": "a2"}),
            },
        ))
        .expect("update");
        let listed = block_on(store.list(NOTES_COLLECTION, "u1")).expect("list");
        assert_eq!(listed[0].id, first.id);
    }

    #[test]
    fn update_missing_document_reports_not_found() {
        let store = MemoryDocumentStore::default();
        let err = block_on(store.update(
            TODOS_COLLECTION,
            "u1",
            "doc-404",
            DocumentPatch {
                payload: json!({}),
            },
        ))
        .expect_err("should fail");
        assert_eq!(err, DocumentError::NotFound);
    }

    #[test]
    fn subscription_pushes_initial_and_change_snapshots_until_dropped() {
        let store = MemoryDocumentStore::default();
        let deliveries = Rc::new(Cell::new(0usize));
        let seen = deliveries.clone();
        let sub = store.subscribe(
            TODOS_COLLECTION,
            "u1",
            Rc::new(move |_records| seen.set(seen.get() + 1)),
        );
        assert_eq!(deliveries.get(), 1, "initial snapshot");

        let created =
            block_on(store.create(TODOS_COLLECTION, "u1", json!({"text": "study"})))
                .expect("create");
        assert_eq!(deliveries.get(), 2, "create snapshot");

        sub.unsubscribe();
        block_on(store.delete(TODOS_COLLECTION, "u1", &created.id)).expect("delete");
        assert_eq!(deliveries.get(), 2, "no delivery after unsubscribe");
    }
}
