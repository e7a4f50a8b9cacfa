//! Factory functions selecting the browser host adapters.
//!
//! On `wasm32` these hand back the live browser implementations; elsewhere
//! they fall back to the inert/no-op adapters so non-browser builds of the
//! workspace still link and run.

use std::rc::Rc;

use platform_host::{
    AudioService, AuthService, DocumentStore, HostServices, NotificationService, PrefsStore,
};

/// Assembles the full browser host service bundle.
pub fn host_services() -> HostServices {
    HostServices {
        auth: auth_service(),
        documents: document_store(),
        audio: audio_service(),
        notifications: notification_service(),
        prefs: prefs_store(),
        host_strategy_name: host_strategy_name(),
    }
}

/// Name of the active host strategy, for boot diagnostics.
pub fn host_strategy_name() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        "web"
    } else {
        "inert"
    }
}

/// Preference store for this host.
pub fn prefs_store() -> Rc<dyn PrefsStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(crate::storage::local_prefs::WebPrefsStore)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(platform_host::NoopPrefsStore)
    }
}

/// Audio playback service for this host.
pub fn audio_service() -> Rc<dyn AudioService> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(crate::audio::WebAudioService)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(platform_host::NoopAudioService)
    }
}

/// Identity/session service for this host.
pub fn auth_service() -> Rc<dyn AuthService> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(crate::session::WebAuthService)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(platform_host::NoopAuthService)
    }
}

/// Document store for this host.
pub fn document_store() -> Rc<dyn DocumentStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(crate::documents::LocalDocumentStore::default())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(platform_host::MemoryDocumentStore::default())
    }
}

/// Notification service for this host.
pub fn notification_service() -> Rc<dyn NotificationService> {
    Rc::new(crate::notifications::WebNotificationService)
}
