//! Todo list app window contents.
//!
//! Items are owner-scoped documents in the todos collection. The window holds
//! a live subscription for its lifetime; every write goes through the host
//! document store and the refreshed result set flows back via the listener.
//! Failed writes surface an inline message and are abandoned.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use desktop_app_contract::AppMountContext;
use leptos::*;
use platform_host::{
    AuthStatus, DocumentPatch, DocumentRecord, HostServices, TODOS_COLLECTION,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Payload shape of one todo document.
pub struct TodoPayload {
    /// Item text.
    pub text: String,
    /// Whether the item is done.
    pub completed: bool,
}

/// Decodes a document payload, tolerating missing fields.
pub fn payload_of(record: &DocumentRecord) -> TodoPayload {
    serde_json::from_value(record.payload.clone()).unwrap_or_default()
}

fn owner_uid(status: Option<RwSignal<AuthStatus>>) -> Option<String> {
    status.and_then(|status| status.get().user().map(|user| user.uid.clone()))
}

#[component]
/// Todo list app window contents.
pub fn TodoApp(
    /// Runtime mount context for this window.
    ctx: AppMountContext,
) -> impl IntoView {
    let services = expect_context::<HostServices>();
    let auth_status = use_context::<RwSignal<AuthStatus>>();

    let records = create_rw_signal(Vec::<DocumentRecord>::new());
    let draft = create_rw_signal(String::new());
    let error = create_rw_signal::<Option<String>>(None);

    let owner = Signal::derive(move || owner_uid(auth_status));

    let store_for_subscribe = services.documents.clone();
    create_effect(move |_| {
        let Some(uid) = owner.get() else {
            records.set(Vec::new());
            return;
        };
        let listener = Rc::new(move |refreshed: Vec<DocumentRecord>| {
            records.set(refreshed);
        });
        let subscription = store_for_subscribe.subscribe(TODOS_COLLECTION, &uid, listener);
        on_cleanup(move || drop(subscription));
    });

    let store_for_add = services.documents.clone();
    let add_item = move || {
        let text = draft.get_untracked().trim().to_string();
        if text.is_empty() {
            return;
        }
        let Some(uid) = owner.get_untracked() else {
            return;
        };
        draft.set(String::new());
        let store = store_for_add.clone();
        spawn_local(async move {
            let payload = TodoPayload {
                text,
                completed: false,
            };
            let value = match serde_json::to_value(&payload) {
                Ok(value) => value,
                Err(err) => {
                    logging::warn!("todo serialize failed: {err}");
                    return;
                }
            };
            match store.create(TODOS_COLLECTION, &uid, value).await {
                Ok(_) => error.set(None),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    let store_for_toggle = services.documents.clone();
    let toggle_item = Callback::new(move |record: DocumentRecord| {
        let Some(uid) = owner.get_untracked() else {
            return;
        };
        let store = store_for_toggle.clone();
        spawn_local(async move {
            let mut payload = payload_of(&record);
            payload.completed = !payload.completed;
            let value = match serde_json::to_value(&payload) {
                Ok(value) => value,
                Err(err) => {
                    logging::warn!("todo serialize failed: {err}");
                    return;
                }
            };
            let patch = DocumentPatch { payload: value };
            match store
                .update(TODOS_COLLECTION, &uid, &record.id, patch)
                .await
            {
                Ok(_) => error.set(None),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    let store_for_delete = services.documents.clone();
    let delete_item = Callback::new(move |id: String| {
        let Some(uid) = owner.get_untracked() else {
            return;
        };
        let store = store_for_delete.clone();
        spawn_local(async move {
            match store.delete(TODOS_COLLECTION, &uid, &id).await {
                Ok(()) => error.set(None),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    let input_dom_id = format!("window-input-{}", ctx.window_id);

    view! {
        <div class="app-todo">
            <form
                class="todo-compose"
                on:submit=move |ev| {
                    ev.prevent_default();
                    add_item();
                }
            >
                <input
                    type="text"
                    id=input_dom_id
                    class="todo-draft"
                    placeholder="Add a task"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button type="submit" class="todo-add">"Add"</button>
            </form>

            <Show when=move || error.get().is_some() fallback=|| ()>
                <p class="todo-error" role="alert">
                    {move || error.get().unwrap_or_default()}
                </p>
            </Show>

            <Show
                when=move || owner.get().is_some()
                fallback=|| view! { <p class="todo-empty">"Sign in to sync your tasks."</p> }
            >
                <ul class="todo-list">
                    <For
                        each=move || records.get()
                        key=|record| (record.id.clone(), record.updated_at_ms)
                        let:record
                    >
                        {
                            let payload = payload_of(&record);
                            let record_for_toggle = record.clone();
                            let id = record.id.clone();
                            view! {
                                <li class="todo-item" class:completed=payload.completed>
                                    <label class="todo-check">
                                        <input
                                            type="checkbox"
                                            prop:checked=payload.completed
                                            on:change=move |_| {
                                                toggle_item.call(record_for_toggle.clone())
                                            }
                                        />
                                        <span class="todo-text">{payload.text.clone()}</span>
                                    </label>
                                    <button
                                        class="todo-delete"
                                        aria-label="Delete task"
                                        on:click=move |_| delete_item.call(id.clone())
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }
                    </For>
                </ul>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(payload: serde_json::Value) -> DocumentRecord {
        DocumentRecord {
            id: "t1".to_string(),
            owner_uid: "u1".to_string(),
            collection: TODOS_COLLECTION.to_string(),
            payload,
            updated_at_ms: 1,
        }
    }

    #[test]
    fn payload_round_trips() {
        let decoded = payload_of(&record(json!({"text": "read", "completed": true})));
        assert_eq!(
            decoded,
            TodoPayload {
                text: "read".to_string(),
                completed: true,
            }
        );
    }

    #[test]
    fn malformed_payload_decodes_to_default() {
        let decoded = payload_of(&record(json!("not an object")));
        assert_eq!(decoded, TodoPayload::default());
    }
}
