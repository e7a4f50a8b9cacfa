//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer: localStorage
//! preferences, `HtmlAudioElement` playback, cookie-mirrored sessions, a
//! localStorage-backed document store stand-in, and Web Notifications. Every
//! adapter degrades to an inert fallback on non-wasm targets so the workspace
//! stays testable off-browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
pub mod audio;
pub mod documents;
pub mod notifications;
pub mod session;
pub mod storage;

pub use adapters::{
    audio_service, auth_service, document_store, host_services, host_strategy_name,
    notification_service, prefs_store,
};
pub use audio::WebAudioService;
pub use documents::LocalDocumentStore;
pub use notifications::WebNotificationService;
pub use session::{clear_session_cookie, session_cookie_present, set_session_cookie, WebAuthService};
pub use storage::local_prefs::WebPrefsStore;
