//! Bundled host service handles injected into the runtime at boot.

use std::rc::Rc;

use crate::documents::{DocumentStore, NoopDocumentStore};
use crate::media::{AudioService, NoopAudioService};
use crate::notifications::{NoopNotificationService, NotificationService};
use crate::session::{AuthService, NoopAuthService};
use crate::storage::prefs::{NoopPrefsStore, PrefsStore};

#[derive(Clone)]
/// Full set of host services an entry layer assembles for the desktop runtime.
pub struct HostServices {
    /// Identity and session service.
    pub auth: Rc<dyn AuthService>,
    /// Owner-scoped document storage.
    pub documents: Rc<dyn DocumentStore>,
    /// Media playback channels.
    pub audio: Rc<dyn AudioService>,
    /// User-visible notifications.
    pub notifications: Rc<dyn NotificationService>,
    /// Lightweight preference storage.
    pub prefs: Rc<dyn PrefsStore>,
    /// Stable name of the selected host strategy, for boot diagnostics.
    pub host_strategy_name: &'static str,
}

impl Default for HostServices {
    fn default() -> Self {
        Self {
            auth: Rc::new(NoopAuthService),
            documents: Rc::new(NoopDocumentStore),
            audio: Rc::new(NoopAudioService),
            notifications: Rc::new(NoopNotificationService),
            prefs: Rc::new(NoopPrefsStore),
            host_strategy_name: "noop",
        }
    }
}
