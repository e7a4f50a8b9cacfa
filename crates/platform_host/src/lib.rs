//! Typed host-domain contracts and shared models used across the desktop runtime
//! and browser adapters.
//!
//! This crate is the API-first boundary for platform services: identity/session,
//! remote document storage, media playback, lightweight preference storage,
//! notifications, and the wallpaper catalog. Concrete browser adapters live in
//! `platform_host_web`; every contract here also ships an in-memory adapter so
//! runtime and app logic stay testable off-wasm.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod documents;
pub mod host;
pub mod media;
pub mod notifications;
pub mod session;
pub mod storage;
pub mod time;
pub mod wallpaper;

pub use documents::{
    DocumentError, DocumentFuture, DocumentListener, DocumentPatch, DocumentRecord,
    DocumentStore, DocumentSubscription, MemoryDocumentStore, NoopDocumentStore,
    NOTES_COLLECTION, TODOS_COLLECTION,
};
pub use host::HostServices;
pub use media::{AudioCall, AudioHandle, AudioService, NoopAudioService, RecordingAudioService};
pub use notifications::{NoopNotificationService, NotificationFuture, NotificationService};
pub use session::{
    AuthError, AuthFuture, AuthService, AuthStatus, AuthUser, MemoryAuthService,
    NoopAuthService, SESSION_COOKIE_NAME,
};
pub use storage::prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
    PrefsStoreFuture,
};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
pub use wallpaper::{
    default_wallpaper, image_wallpapers, online_wallpapers, resolve_wallpaper,
    video_wallpapers, WallpaperEntry, WallpaperMediaKind, WallpaperSelection,
};
