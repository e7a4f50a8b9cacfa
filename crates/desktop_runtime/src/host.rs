//! Host-side runtime helpers for executing reducer effects and querying browser environment state.

use std::rc::Rc;

use leptos::{logging, spawn_local, Callable, Callback, SignalGetUntracked};
use platform_host::{
    AudioHandle, AudioService, AuthService, DocumentStore, HostServices, NotificationService,
    PrefsStore,
};

use crate::{
    components::{DOCK_HEIGHT_PX, MENU_BAR_HEIGHT_PX},
    model::{WindowId, WindowRect},
    persistence,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

/// Source URL of the timer completion cue.
pub const COMPLETION_CUE_URL: &str = "/sounds/notification.mp3";
const COMPLETION_CUE_HANDLE: &str = "system.completion-cue";

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
}

impl DesktopHostContext {
    /// Wraps an injected host service bundle.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Returns the configured identity/session service.
    pub fn auth_service(&self) -> Rc<dyn AuthService> {
        self.services.auth.clone()
    }

    /// Returns the configured document storage service.
    pub fn document_store(&self) -> Rc<dyn DocumentStore> {
        self.services.documents.clone()
    }

    /// Returns the configured audio playback service.
    pub fn audio_service(&self) -> Rc<dyn AudioService> {
        self.services.audio.clone()
    }

    /// Returns the configured notification delivery service.
    pub fn notification_service(&self) -> Rc<dyn NotificationService> {
        self.services.notifications.clone()
    }

    /// Returns the configured lightweight preference service.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs.clone()
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy_name
    }

    /// Installs boot hydration for persisted settings and timer state.
    ///
    /// Settings hydrate before the timer so duration sanitization sees the
    /// restored durations rather than the defaults.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        let prefs = self.prefs_store();
        spawn_local(async move {
            if let Some(settings) = persistence::load_settings(prefs.as_ref()).await {
                dispatch.call(DesktopAction::HydrateSettings { settings });
            }
            if let Some(timer) = persistence::load_timer(prefs.as_ref()).await {
                dispatch.call(DesktopAction::HydrateTimer { timer });
            }
        });
    }

    /// Installs the once-per-second tick that reconciles the timer countdown.
    pub fn install_timer_interval(&self, dispatch: Callback<DesktopAction>) {
        #[cfg(target_arch = "wasm32")]
        {
            leptos::set_interval(
                move || {
                    dispatch.call(DesktopAction::TimerTick {
                        now_ms: platform_host::unix_time_ms_now(),
                    });
                },
                std::time::Duration::from_secs(1),
            );
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = dispatch;
        }
    }

    /// Installs a browser resize listener that re-clamps every window.
    pub fn install_viewport_listener(&self, dispatch: Callback<DesktopAction>) {
        #[cfg(target_arch = "wasm32")]
        {
            let host = self.clone();
            let listener = leptos::window_event_listener(leptos::ev::resize, move |_| {
                dispatch.call(DesktopAction::ViewportResized {
                    viewport: host.desktop_viewport_rect(),
                });
            });
            // Listener lives for the page lifetime.
            std::mem::forget(listener);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = dispatch;
        }
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistSettings => {
                let prefs = self.prefs_store();
                let settings = runtime.state.get_untracked().settings;
                spawn_local(async move {
                    if let Err(err) = persistence::persist_settings(prefs.as_ref(), &settings).await
                    {
                        logging::warn!("settings persist failed: {err}");
                    }
                });
            }
            RuntimeEffect::PersistTimer => {
                let prefs = self.prefs_store();
                let timer = runtime.state.get_untracked().timer;
                spawn_local(async move {
                    if let Err(err) = persistence::persist_timer(prefs.as_ref(), &timer).await {
                        logging::warn!("timer persist failed: {err}");
                    }
                });
            }
            RuntimeEffect::PlayCompletionCue => {
                let audio = self.audio_service();
                let volume = runtime
                    .state
                    .get_untracked()
                    .settings
                    .notification_volume;
                let handle = AudioHandle::new(COMPLETION_CUE_HANDLE);
                audio.ensure(&handle, COMPLETION_CUE_URL, false);
                audio.play(&handle, volume);
            }
            RuntimeEffect::Notify { title, body } => {
                let notifications = self.notification_service();
                spawn_local(async move {
                    if let Err(err) = notifications.notify(&title, &body).await {
                        logging::warn!("notification delivery failed: {err}");
                    }
                });
            }
            RuntimeEffect::FocusWindowInput(window_id) => focus_window_input(window_id),
        }
    }

    /// Returns the desktop viewport rect between the menu bar and the dock.
    pub fn desktop_viewport_rect(&self) -> WindowRect {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(1280.0) as i32;
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(800.0) as i32;
                return WindowRect {
                    x: 0,
                    y: MENU_BAR_HEIGHT_PX,
                    w: width,
                    h: (height - MENU_BAR_HEIGHT_PX - DOCK_HEIGHT_PX).max(0),
                };
            }
        }

        WindowRect {
            x: 0,
            y: MENU_BAR_HEIGHT_PX,
            w: 1280,
            h: 800 - MENU_BAR_HEIGHT_PX - DOCK_HEIGHT_PX,
        }
    }
}

/// Moves browser focus into the window's primary input, when the app renders one.
fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        let dom_id = crate::components::window_primary_input_dom_id(window_id);
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&dom_id));
        if let Some(element) = element {
            if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                let _ = element.focus();
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = window_id;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn viewport_rect_excludes_menu_bar_and_dock() {
        let host = DesktopHostContext::new(HostServices::default());
        let rect = host.desktop_viewport_rect();

        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, MENU_BAR_HEIGHT_PX);
        assert_eq!(rect.w, 1280);
        assert_eq!(rect.h, 800 - MENU_BAR_HEIGHT_PX - DOCK_HEIGHT_PX);
    }
}
