//! Notes app window contents.
//!
//! Notes are owner-scoped documents holding plain text; the title is derived
//! from the first non-empty line. The list pane orders by recency and tracks a
//! live subscription; edits save on input and failed writes surface an inline
//! message without retrying.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use desktop_app_contract::AppMountContext;
use leptos::*;
use platform_host::{
    AuthStatus, DocumentPatch, DocumentRecord, HostServices, NOTES_COLLECTION,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Payload shape of one note document.
pub struct NotePayload {
    /// Full note text.
    pub content: String,
}

/// Decodes a note payload, tolerating missing fields.
pub fn payload_of(record: &DocumentRecord) -> NotePayload {
    serde_json::from_value(record.payload.clone()).unwrap_or_default()
}

/// Derives the list title from the first non-empty line.
pub fn title_of(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Untitled")
        .to_string()
}

fn owner_uid(status: Option<RwSignal<AuthStatus>>) -> Option<String> {
    status.and_then(|status| status.get().user().map(|user| user.uid.clone()))
}

#[component]
/// Notes app window contents.
pub fn NotesApp(
    /// Runtime mount context for this window.
    ctx: AppMountContext,
) -> impl IntoView {
    let services = expect_context::<HostServices>();
    let auth_status = use_context::<RwSignal<AuthStatus>>();

    let records = create_rw_signal(Vec::<DocumentRecord>::new());
    let selected_id = create_rw_signal::<Option<String>>(None);
    let draft = create_rw_signal(String::new());
    let error = create_rw_signal::<Option<String>>(None);

    let owner = Signal::derive(move || owner_uid(auth_status));

    let store_for_subscribe = services.documents.clone();
    create_effect(move |_| {
        let Some(uid) = owner.get() else {
            records.set(Vec::new());
            selected_id.set(None);
            return;
        };
        let listener = Rc::new(move |refreshed: Vec<DocumentRecord>| {
            // Keep the selection when it survives the refresh.
            let still_selected = selected_id
                .get_untracked()
                .map(|id| refreshed.iter().any(|record| record.id == id))
                .unwrap_or(false);
            if !still_selected {
                selected_id.set(None);
            }
            records.set(refreshed);
        });
        let subscription = store_for_subscribe.subscribe(NOTES_COLLECTION, &uid, listener);
        on_cleanup(move || drop(subscription));
    });

    let select_note = Callback::new(move |record: DocumentRecord| {
        selected_id.set(Some(record.id.clone()));
        draft.set(payload_of(&record).content);
        error.set(None);
    });

    let store_for_create = services.documents.clone();
    let new_note = move |_| {
        let Some(uid) = owner.get_untracked() else {
            return;
        };
        let store = store_for_create.clone();
        spawn_local(async move {
            let value = match serde_json::to_value(&NotePayload::default()) {
                Ok(value) => value,
                Err(err) => {
                    logging::warn!("note serialize failed: {err}");
                    return;
                }
            };
            match store.create(NOTES_COLLECTION, &uid, value).await {
                Ok(record) => {
                    selected_id.set(Some(record.id));
                    draft.set(String::new());
                    error.set(None);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    let store_for_save = services.documents.clone();
    let save_draft = Callback::new(move |content: String| {
        let Some(uid) = owner.get_untracked() else {
            return;
        };
        let Some(id) = selected_id.get_untracked() else {
            return;
        };
        let store = store_for_save.clone();
        spawn_local(async move {
            let value = match serde_json::to_value(&NotePayload { content }) {
                Ok(value) => value,
                Err(err) => {
                    logging::warn!("note serialize failed: {err}");
                    return;
                }
            };
            let patch = DocumentPatch { payload: value };
            match store.update(NOTES_COLLECTION, &uid, &id, patch).await {
                Ok(_) => error.set(None),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    let store_for_delete = services.documents.clone();
    let delete_selected = Callback::new(move |_: ()| {
        let Some(uid) = owner.get_untracked() else {
            return;
        };
        let Some(id) = selected_id.get_untracked() else {
            return;
        };
        let store = store_for_delete.clone();
        spawn_local(async move {
            match store.delete(NOTES_COLLECTION, &uid, &id).await {
                Ok(()) => {
                    selected_id.set(None);
                    draft.set(String::new());
                    error.set(None);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    let editing = move || selected_id.get().is_some();
    let input_dom_id = format!("window-input-{}", ctx.window_id);

    view! {
        <div class="app-notes">
            <aside class="notes-sidebar">
                <button class="notes-new" on:click=new_note>
                    "New note"
                </button>
                <ul class="notes-list">
                    <For
                        each=move || records.get()
                        key=|record| (record.id.clone(), record.updated_at_ms)
                        let:record
                    >
                        {
                            let title = title_of(&payload_of(&record).content);
                            let id = record.id.clone();
                            let record_for_select = record.clone();
                            view! {
                                <li>
                                    <button
                                        class="notes-entry"
                                        class:selected=move || {
                                            selected_id.get().as_deref() == Some(id.as_str())
                                        }
                                        on:click=move |_| {
                                            select_note.call(record_for_select.clone())
                                        }
                                    >
                                        {title}
                                    </button>
                                </li>
                            }
                        }
                    </For>
                </ul>
            </aside>

            <section class="notes-editor-pane">
                <Show when=move || error.get().is_some() fallback=|| ()>
                    <p class="notes-error" role="alert">
                        {move || error.get().unwrap_or_default()}
                    </p>
                </Show>

                <Show
                    when=editing
                    fallback=|| view! { <p class="notes-empty">"Select or create a note."</p> }
                >
                    <textarea
                        id=input_dom_id.clone()
                        class="notes-editor"
                        prop:value=move || draft.get()
                        on:input=move |ev| {
                            let content = event_target_value(&ev);
                            draft.set(content.clone());
                            save_draft.call(content);
                        }
                    ></textarea>
                    <button class="notes-delete" on:click=move |_| delete_selected.call(())>
                        "Delete note"
                    </button>
                </Show>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn title_comes_from_first_non_empty_line() {
        assert_eq!(title_of("\n\n  Shopping list\nmilk"), "Shopping list");
        assert_eq!(title_of("plain"), "plain");
    }

    #[test]
    fn blank_content_titles_as_untitled() {
        assert_eq!(title_of(""), "Untitled");
        assert_eq!(title_of("   \n  "), "Untitled");
    }

    #[test]
    fn malformed_payload_decodes_to_default() {
        let record = DocumentRecord {
            id: "n1".to_string(),
            owner_uid: "u1".to_string(),
            collection: NOTES_COLLECTION.to_string(),
            payload: json!(42),
            updated_at_ms: 1,
        };
        assert_eq!(payload_of(&record), NotePayload::default());
    }
}
