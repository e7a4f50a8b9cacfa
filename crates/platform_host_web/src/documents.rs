//! `localStorage`-persisted document store.
//!
//! Stand-in for the remote document backend: each (collection, owner) pair is
//! serialized as one localStorage entry, and subscriptions are served from an
//! in-process listener map. Because all writes in a single page go through
//! this store, local notification after each write reproduces the remote
//! backend's push behavior.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use platform_host::{
    next_monotonic_timestamp_ms, DocumentError, DocumentFuture, DocumentListener, DocumentPatch,
    DocumentRecord, DocumentStore, DocumentSubscription,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::local_prefs::WebPrefsStore;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CollectionTable {
    records: Vec<DocumentRecord>,
    next_id: u64,
}

type ListenerMap = HashMap<(String, String), Vec<(u64, DocumentListener)>>;

#[derive(Clone, Default)]
/// Browser document store persisting collections in `localStorage`.
pub struct LocalDocumentStore {
    listeners: Rc<RefCell<ListenerMap>>,
    next_listener_id: Rc<RefCell<u64>>,
}

fn table_key(collection: &str, owner_uid: &str) -> String {
    format!("studydesk.docs.{collection}.{owner_uid}.v1")
}

impl LocalDocumentStore {
    fn load_table(collection: &str, owner_uid: &str) -> CollectionTable {
        WebPrefsStore
            .load_json(&table_key(collection, owner_uid))
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save_table(
        collection: &str,
        owner_uid: &str,
        table: &CollectionTable,
    ) -> Result<(), DocumentError> {
        let raw = serde_json::to_string(table).map_err(|_| DocumentError::Backend)?;
        WebPrefsStore
            .save_json(&table_key(collection, owner_uid), &raw)
            .map_err(|err| {
                log_write_failure(collection, &err);
                DocumentError::Backend
            })
    }

    fn ordered(table: &CollectionTable) -> Vec<DocumentRecord> {
        let mut records = table.records.clone();
        records.sort_by(|a, b| b.updated_at_ms.cmp(&a.updated_at_ms));
        records
    }

    fn notify(&self, collection: &str, owner_uid: &str) {
        let snapshot = Self::ordered(&Self::load_table(collection, owner_uid));
        let listeners: Vec<DocumentListener> = self
            .listeners
            .borrow()
            .get(&(collection.to_string(), owner_uid.to_string()))
            .map(|entries| entries.iter().map(|(_, l)| l.clone()).collect())
            .unwrap_or_default();
        for listener in listeners {
            listener(snapshot.clone());
        }
    }
}

fn log_write_failure(collection: &str, cause: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&format!("document write failed for {collection}: {cause}").into());

    #[cfg(not(target_arch = "wasm32"))]
    let _ = (collection, cause);
}

impl DocumentStore for LocalDocumentStore {
    fn list<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
    ) -> DocumentFuture<'a, Result<Vec<DocumentRecord>, DocumentError>> {
        Box::pin(async move { Ok(Self::ordered(&Self::load_table(collection, owner_uid))) })
    }

    fn create<'a>(
        &'a self,
        collection: &'a str,
        owner_uid: &'a str,
        payload: Value,
    ) -> DocumentFuture<'a, Result<DocumentRecord, DocumentError>> {
        Box::pin(async move {
            let mut table = Self::load_table(collection, owner_uid);
            table.next_id += 1;
            let record = DocumentRecord {
                id: format!("doc-{}", table.next_id),
                owner_uid: owner_uid.to_string(),
                collection: collection.to_string(),
                payload,
                updated_at_ms: next_monotonic_timestamp_ms(),
            };
            table.records.push(record.clone());
            Self::save_table(collection, owner_uid, &table)?;
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
            let mut table = Self::load_table(collection, owner_uid);
            let record = table
                .records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(DocumentError::NotFound)?;
            record.payload = patch.payload;
            record.updated_at_ms = next_monotonic_timestamp_ms();
            let updated = record.clone();
            Self::save_table(collection, owner_uid, &table)?;
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
            let mut table = Self::load_table(collection, owner_uid);
            let before = table.records.len();
            table.records.retain(|r| r.id != id);
            if table.records.len() == before {
                return Err(DocumentError::NotFound);
            }
            Self::save_table(collection, owner_uid, &table)?;
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
            let mut next = self.next_listener_id.borrow_mut();
            *next += 1;
            let listener_id = *next;
            self.listeners
                .borrow_mut()
                .entry(key.clone())
                .or_default()
                .push((listener_id, listener.clone()));
            listener_id
        };

        listener(Self::ordered(&Self::load_table(collection, owner_uid)));

        let listeners = self.listeners.clone();
        DocumentSubscription::new(move || {
            let mut listeners = listeners.borrow_mut();
            if let Some(entries) = listeners.get_mut(&key) {
                entries.retain(|(id, _)| *id != listener_id);
                if entries.is_empty() {
                    listeners.remove(&key);
                }
            }
        })
    }
}
