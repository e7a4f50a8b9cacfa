//! Shared contract types between the desktop window-manager runtime and hosted
//! widget apps.
//!
//! The runtime owns window lifecycle and geometry; apps own their content. This
//! crate carries the narrow seam between the two: lifecycle events pushed from
//! the manager into a mounted app, and commands an app may send back up.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod settings;
pub mod shell;
pub mod timer;

pub use settings::{SettingsState, ThemeMode};
pub use shell::{use_desktop_handle, DesktopHandle, ShellCommand};
pub use timer::{TimerCompletion, TimerMode, TimerState};

use leptos::{Callable, Callback, ReadSignal};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Lifecycle events emitted by the desktop window manager.
///
/// Minimized windows keep their content subtree mounted; only `Closing`/`Closed`
/// tear an app down.
pub enum AppLifecycleEvent {
    /// App view has been mounted into a managed window.
    Mounted,
    /// Window became focused.
    Focused,
    /// Window lost focus.
    Blurred,
    /// Window was minimized (content stays mounted, visually hidden).
    Minimized,
    /// Window was restored from minimized or maximized state.
    Restored,
    /// Window close sequence started.
    Closing,
    /// Window close sequence completed.
    Closed,
}

impl AppLifecycleEvent {
    /// Returns a stable string token for persistence/debugging hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::Focused => "focused",
            Self::Blurred => "blurred",
            Self::Minimized => "minimized",
            Self::Restored => "restored",
            Self::Closing => "closing",
            Self::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Commands emitted by a hosted app back to the desktop runtime.
pub enum AppCommand {
    /// Request a title update for the current window.
    SetWindowTitle {
        /// New title text.
        title: String,
    },
    /// Request closing the current window.
    CloseSelf,
    /// Emit a host notification.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body.
        body: String,
    },
}

#[derive(Clone, Copy)]
/// Command channel from a mounted app to the desktop runtime.
pub struct AppHost {
    sender: Callback<AppCommand>,
}

impl AppHost {
    /// Wraps a runtime-owned command callback.
    pub fn new(sender: Callback<AppCommand>) -> Self {
        Self { sender }
    }

    /// Sends a command to the runtime that owns this window.
    pub fn send(&self, command: AppCommand) {
        self.sender.call(command);
    }
}

#[derive(Clone, Copy)]
/// Context handed to an app when the manager mounts it into a window.
pub struct AppMountContext {
    /// Runtime id of the hosting window.
    pub window_id: WindowRuntimeId,
    /// Reactive lifecycle signal owned by the runtime.
    pub lifecycle: ReadSignal<AppLifecycleEvent>,
    /// Command channel back to the runtime.
    pub host: AppHost,
}

/// Launch parameters passed through `OpenApp` into the mounted app.
///
/// Kept as loose JSON so the runtime does not need to know app payload shapes.
pub type LaunchParams = Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_tokens_are_stable() {
        assert_eq!(AppLifecycleEvent::Mounted.token(), "mounted");
        assert_eq!(AppLifecycleEvent::Closed.token(), "closed");
        assert_eq!(AppLifecycleEvent::Minimized.token(), "minimized");
    }

    #[test]
    fn lifecycle_round_trips_through_serde() {
        let raw = serde_json::to_string(&AppLifecycleEvent::Restored).expect("serialize");
        let back: AppLifecycleEvent = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(back, AppLifecycleEvent::Restored);
    }
}
