//! Per-window app session state owned by the desktop shell.
//!
//! Each managed window gets a lifecycle signal its app can observe. Sessions
//! are created when a window appears in the reducer state and torn down when
//! it closes; minimizing keeps the session (and the app subtree) alive.

use std::collections::{BTreeSet, HashMap};

use desktop_app_contract::AppLifecycleEvent;
use leptos::*;

use crate::model::{WindowId, WindowRecord};

#[derive(Clone, Copy)]
/// Reactive per-window app session signals.
pub struct WindowAppSession {
    /// Latest lifecycle signal value for the window.
    pub lifecycle: RwSignal<AppLifecycleEvent>,
}

#[derive(Default)]
/// Runtime-owned app session state.
pub struct AppRuntimeState {
    sessions: HashMap<WindowId, WindowAppSession>,
}

impl AppRuntimeState {
    fn ensure_session(&mut self, window_id: WindowId) -> WindowAppSession {
        if let Some(session) = self.sessions.get(&window_id).copied() {
            return session;
        }
        let session = WindowAppSession {
            lifecycle: create_rw_signal(AppLifecycleEvent::Mounted),
        };
        self.sessions.insert(window_id, session);
        session
    }

    fn set_lifecycle(&mut self, window_id: WindowId, event: AppLifecycleEvent) {
        let session = self.ensure_session(window_id);
        if session.lifecycle.get_untracked() != event {
            session.lifecycle.set(event);
        }
    }

    fn sync_windows(&mut self, previous: &[WindowRecord], current: &[WindowRecord]) {
        let active: BTreeSet<WindowId> = current.iter().map(|win| win.id).collect();

        let stale: Vec<WindowId> = self
            .sessions
            .keys()
            .copied()
            .filter(|window_id| !active.contains(window_id))
            .collect();
        for window_id in stale {
            if let Some(session) = self.sessions.remove(&window_id) {
                session.lifecycle.set(AppLifecycleEvent::Closed);
            }
        }

        let previously_focused = focused_of(previous);
        let focused = focused_of(current);

        for window in current {
            self.ensure_session(window.id);
            let was_minimized = previous
                .iter()
                .find(|w| w.id == window.id)
                .map(|w| w.minimized);

            let event = if was_minimized == Some(false) && window.minimized {
                Some(AppLifecycleEvent::Minimized)
            } else if was_minimized == Some(true) && !window.minimized {
                Some(AppLifecycleEvent::Restored)
            } else if focused == Some(window.id) && previously_focused != focused {
                Some(AppLifecycleEvent::Focused)
            } else if previously_focused == Some(window.id) && focused != previously_focused {
                Some(AppLifecycleEvent::Blurred)
            } else {
                None
            };
            if let Some(event) = event {
                self.set_lifecycle(window.id, event);
            }
        }
    }
}

fn focused_of(windows: &[WindowRecord]) -> Option<WindowId> {
    windows
        .iter()
        .filter(|w| !w.minimized)
        .max_by_key(|w| w.z_index)
        .map(|w| w.id)
}

/// Ensures and returns a per-window runtime app session.
pub fn ensure_window_session(
    runtime_state: RwSignal<AppRuntimeState>,
    window_id: WindowId,
) -> WindowAppSession {
    if let Some(session) =
        runtime_state.with_untracked(|state| state.sessions.get(&window_id).copied())
    {
        return session;
    }

    let mut session = None;
    runtime_state.update(|state| {
        session = Some(state.ensure_session(window_id));
    });
    session.expect("window app session ensured")
}

/// Syncs session state and lifecycle signals after a reducer transition.
pub fn sync_runtime_sessions(
    runtime_state: RwSignal<AppRuntimeState>,
    previous: &[WindowRecord],
    current: &[WindowRecord],
) {
    runtime_state.update(|state| state.sync_windows(previous, current));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AppId, DesktopState, InteractionState, WindowRect};
    use crate::reducer::{reduce_desktop, DesktopAction};

    const VIEWPORT: WindowRect = WindowRect {
        x: 0,
        y: 32,
        w: 1280,
        h: 720,
    };

    fn apply(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        app_runtime: &mut AppRuntimeState,
        action: DesktopAction,
    ) {
        let previous = state.windows.clone();
        reduce_desktop(state, interaction, action);
        app_runtime.sync_windows(&previous, &state.windows);
    }

    #[test]
    fn minimized_window_session_survives_while_focus_moves_on() {
        let runtime = create_runtime();

        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let mut app_runtime = AppRuntimeState::default();

        for app_id in [AppId::Pomodoro, AppId::Notes, AppId::Todo] {
            apply(
                &mut state,
                &mut interaction,
                &mut app_runtime,
                DesktopAction::OpenApp {
                    app_id,
                    viewport: VIEWPORT,
                },
            );
        }
        let first = state.window_for_app(AppId::Pomodoro).expect("window").id;
        let second = state.window_for_app(AppId::Notes).expect("window").id;

        apply(
            &mut state,
            &mut interaction,
            &mut app_runtime,
            DesktopAction::MinimizeWindow { window_id: second },
        );
        apply(
            &mut state,
            &mut interaction,
            &mut app_runtime,
            DesktopAction::FocusWindow { window_id: first },
        );

        // All three records survive; the refocused window tops the stack.
        assert_eq!(state.windows.len(), 3);
        assert_eq!(state.focused_window_id(), Some(first));
        let top = state
            .windows
            .iter()
            .max_by_key(|w| w.z_index)
            .expect("windows")
            .id;
        assert_eq!(top, first);

        // The minimized window keeps its session alive and observes the
        // minimize, nothing stronger.
        assert_eq!(app_runtime.sessions.len(), 3);
        let minimized = app_runtime.sessions.get(&second).expect("session");
        assert_eq!(
            minimized.lifecycle.get_untracked(),
            AppLifecycleEvent::Minimized
        );
        let focused = app_runtime.sessions.get(&first).expect("session");
        assert_eq!(focused.lifecycle.get_untracked(), AppLifecycleEvent::Focused);

        runtime.dispose();
    }

    #[test]
    fn closing_a_window_tears_its_session_down() {
        let runtime = create_runtime();

        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let mut app_runtime = AppRuntimeState::default();

        apply(
            &mut state,
            &mut interaction,
            &mut app_runtime,
            DesktopAction::OpenApp {
                app_id: AppId::Music,
                viewport: VIEWPORT,
            },
        );
        let id = state.window_for_app(AppId::Music).expect("window").id;
        let session = app_runtime.sessions.get(&id).copied().expect("session");

        apply(
            &mut state,
            &mut interaction,
            &mut app_runtime,
            DesktopAction::CloseWindow { window_id: id },
        );

        assert!(app_runtime.sessions.get(&id).is_none());
        assert_eq!(session.lifecycle.get_untracked(), AppLifecycleEvent::Closed);

        runtime.dispose();
    }
}
