//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::settings::SettingsState;
use desktop_app_contract::timer::{TimerMode, TimerState};

use crate::model::{
    AppId, DesktopState, InteractionState, PointerPosition, ResizeEdge, ResizeSession, WindowId,
    WindowRecord, WindowRect,
};

const MIN_WINDOW_WIDTH: i32 = 240;
const MIN_WINDOW_HEIGHT: i32 = 180;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open an app's window, or surface the existing one.
    OpenApp {
        /// App to open.
        app_id: AppId,
        /// Current desktop viewport rectangle.
        viewport: WindowRect,
    },
    /// Dock click: open, restore, minimize, or focus depending on window state.
    ToggleDockApp {
        /// App associated with the dock button.
        app_id: AppId,
        /// Current desktop viewport rectangle.
        viewport: WindowRect,
    },
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Maximize a window to the provided viewport.
    MaximizeWindow {
        /// Window to maximize.
        window_id: WindowId,
        /// Viewport rectangle to maximize into.
        viewport: WindowRect,
    },
    /// Restore a minimized or maximized window.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Current desktop viewport rectangle.
        viewport: WindowRect,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Current desktop viewport rectangle.
        viewport: WindowRect,
    },
    /// End the active window resize.
    EndResize,
    /// Re-clamp all windows after the browser viewport changed.
    ViewportResized {
        /// New desktop viewport rectangle.
        viewport: WindowRect,
    },
    /// Replace desktop settings wholesale (settings app form submit).
    ApplySettings {
        /// New settings values; sanitized before being applied.
        settings: SettingsState,
    },
    /// Start the timer countdown.
    TimerStart {
        /// Current wall-clock time in unix milliseconds.
        now_ms: u64,
    },
    /// Pause the timer countdown.
    TimerPause {
        /// Current wall-clock time in unix milliseconds.
        now_ms: u64,
    },
    /// Reset the timer to the current mode's full duration.
    TimerReset,
    /// Switch the timer mode manually.
    TimerSwitchMode {
        /// Mode to switch into.
        mode: TimerMode,
    },
    /// Reconcile the countdown against the clock.
    TimerTick {
        /// Current wall-clock time in unix milliseconds.
        now_ms: u64,
    },
    /// Hydrate settings from persisted state at boot.
    HydrateSettings {
        /// Persisted settings payload.
        settings: SettingsState,
    },
    /// Hydrate timer state from persisted state at boot.
    HydrateTimer {
        /// Persisted timer payload.
        timer: TimerState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist the current settings state.
    PersistSettings,
    /// Persist the current timer state.
    PersistTimer,
    /// Move focus into the newly focused window's primary input.
    FocusWindowInput(WindowId),
    /// Play the timer completion cue (subject to sound settings).
    PlayCompletionCue,
    /// Deliver a user-visible notification.
    Notify {
        /// Notification title.
        title: String,
        /// Notification body text.
        body: String,
    },
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// This function is the authoritative state transition engine for window management, settings,
/// and the pomodoro timer. Actions referencing a window that no longer exists are ignored; a
/// stale dispatch from an unmounting component is not an error.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenApp { app_id, viewport } => {
            open_or_surface(state, app_id, viewport, &mut effects);
        }
        DesktopAction::ToggleDockApp { app_id, viewport } => {
            let Some(window) = state.window_for_app(app_id) else {
                open_or_surface(state, app_id, viewport, &mut effects);
                return effects;
            };
            let window_id = window.id;
            if window.minimized {
                // Un-minimizing surfaces the window as it was, maximized or
                // not; only the explicit restore control pops restore_rect.
                raise_window(state, window_id);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            } else if state.focused_window_id() == Some(window_id) {
                minimize_window(state, window_id);
            } else {
                raise_window(state, window_id);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::CloseWindow { window_id } => {
            state.windows.retain(|w| w.id != window_id);
            if interaction.dragging.as_ref().map(|s| s.window_id) == Some(window_id) {
                interaction.dragging = None;
            }
            if interaction.resizing.as_ref().map(|s| s.window_id) == Some(window_id) {
                interaction.resizing = None;
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            if state.windows.iter().any(|w| w.id == window_id) {
                raise_window(state, window_id);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            minimize_window(state, window_id);
        }
        DesktopAction::MaximizeWindow {
            window_id,
            viewport,
        } => {
            let Some(window) = find_window_mut(state, window_id) else {
                return effects;
            };
            if !window.maximized {
                window.restore_rect = Some(window.rect);
            }
            window.rect = viewport;
            window.maximized = true;
            window.minimized = false;
            raise_window(state, window_id);
        }
        DesktopAction::RestoreWindow { window_id } => {
            restore_window(state, window_id);
            if state.windows.iter().any(|w| w.id == window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let Some(window) = state.windows.iter().find(|w| w.id == window_id) else {
                return effects;
            };
            if window.maximized {
                return effects;
            }
            let rect_start = window.rect;
            raise_window(state, window_id);
            interaction.dragging = Some(crate::model::DragSession {
                window_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateMove { pointer, viewport } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let rect = session.rect_start.offset(dx, dy).contained_in(viewport);
                if let Some(window) = find_window_mut(state, session.window_id) {
                    if !window.maximized {
                        window.rect = rect;
                    }
                }
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let Some(window) = state.windows.iter().find(|w| w.id == window_id) else {
                return effects;
            };
            if window.maximized {
                return effects;
            }
            let rect_start = window.rect;
            raise_window(state, window_id);
            interaction.resizing = Some(ResizeSession {
                window_id,
                edge,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateResize { pointer, viewport } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let rect = resize_rect(session.rect_start, session.edge, dx, dy)
                    .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
                    .contained_in(viewport);
                if let Some(window) = find_window_mut(state, session.window_id) {
                    if !window.maximized {
                        window.rect = rect;
                    }
                }
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::ViewportResized { viewport } => {
            for window in &mut state.windows {
                if window.maximized {
                    window.rect = viewport;
                } else {
                    window.rect = window.rect.contained_in(viewport);
                }
                // Saved pre-maximize geometry must also fit the new viewport,
                // or a later restore would land the window off screen.
                if let Some(saved) = window.restore_rect {
                    window.restore_rect = Some(saved.contained_in(viewport));
                }
            }
        }
        DesktopAction::ApplySettings { settings } => {
            let settings = settings.sanitized();
            let durations_changed = settings.focus_secs != state.settings.focus_secs
                || settings.short_break_secs != state.settings.short_break_secs
                || settings.long_break_secs != state.settings.long_break_secs;
            state.settings = settings;
            // An idle countdown shows the configured duration, so duration
            // edits take effect immediately; a running one keeps its anchor.
            if durations_changed && !state.timer.is_running {
                state.timer.reset(&state.settings);
                effects.push(RuntimeEffect::PersistTimer);
            }
            effects.push(RuntimeEffect::PersistSettings);
        }
        DesktopAction::TimerStart { now_ms } => {
            state.timer.start(now_ms);
            effects.push(RuntimeEffect::PersistTimer);
        }
        DesktopAction::TimerPause { now_ms } => {
            state.timer.pause(now_ms);
            effects.push(RuntimeEffect::PersistTimer);
        }
        DesktopAction::TimerReset => {
            state.timer.reset(&state.settings);
            effects.push(RuntimeEffect::PersistTimer);
        }
        DesktopAction::TimerSwitchMode { mode } => {
            state.timer.switch_mode(mode, &state.settings);
            effects.push(RuntimeEffect::PersistTimer);
        }
        DesktopAction::TimerTick { now_ms } => {
            let before = state.timer.clone();
            if let Some(completion) = state.timer.tick(now_ms, &state.settings) {
                if state.settings.sound_enabled {
                    effects.push(RuntimeEffect::PlayCompletionCue);
                }
                effects.push(RuntimeEffect::Notify {
                    title: format!("{} complete", completion.finished_mode.label()),
                    body: format!("Time for {}.", completion.next_mode.label()),
                });
            }
            if state.timer != before {
                effects.push(RuntimeEffect::PersistTimer);
            }
        }
        DesktopAction::HydrateSettings { settings } => {
            state.settings = settings.sanitized();
        }
        DesktopAction::HydrateTimer { timer } => {
            state.timer = timer.sanitized(&state.settings);
        }
    }
    effects
}

fn open_or_surface(
    state: &mut DesktopState,
    app_id: AppId,
    viewport: WindowRect,
    effects: &mut Vec<RuntimeEffect>,
) {
    if let Some(existing) = state.window_for_app(app_id) {
        let window_id = existing.id;
        raise_window(state, window_id);
        effects.push(RuntimeEffect::FocusWindowInput(window_id));
        return;
    }

    let window_id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    let z_index = state.next_z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);

    let (w, h) = app_id.default_size();
    let record = WindowRecord {
        id: window_id,
        app_id,
        title: app_id.title().to_string(),
        rect: WindowRect::centered_in(viewport, w, h),
        restore_rect: None,
        z_index,
        minimized: false,
        maximized: false,
    };
    state.windows.push(record);
    effects.push(RuntimeEffect::FocusWindowInput(window_id));
}

fn find_window_mut(state: &mut DesktopState, window_id: WindowId) -> Option<&mut WindowRecord> {
    state.windows.iter_mut().find(|w| w.id == window_id)
}

/// Brings a window to the top of the stack. The z counter is monotonic: raising
/// never renumbers other windows, so concurrent readers observe a stable order.
fn raise_window(state: &mut DesktopState, window_id: WindowId) {
    let already_top = state.focused_window_id() == Some(window_id);
    let next_z = state.next_z_index;
    let Some(window) = find_window_mut(state, window_id) else {
        return;
    };
    if already_top && !window.minimized {
        return;
    }
    window.minimized = false;
    window.z_index = next_z;
    state.next_z_index = next_z.saturating_add(1);
}

fn minimize_window(state: &mut DesktopState, window_id: WindowId) {
    if let Some(window) = find_window_mut(state, window_id) {
        window.minimized = true;
    }
}

/// Handles the explicit restore control: pops the pre-maximize geometry and
/// surfaces the window.
fn restore_window(state: &mut DesktopState, window_id: WindowId) {
    let Some(window) = find_window_mut(state, window_id) else {
        return;
    };
    if window.maximized {
        if let Some(restore_rect) = window.restore_rect.take() {
            window.rect = restore_rect;
        }
        window.maximized = false;
    }
    raise_window(state, window_id);
}

fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    match edge {
        ResizeEdge::East => WindowRect {
            w: start.w + dx,
            ..start
        },
        ResizeEdge::West => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            ..start
        },
        ResizeEdge::South => WindowRect {
            h: start.h + dy,
            ..start
        },
        ResizeEdge::North => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            ..start
        },
        ResizeEdge::NorthEast => WindowRect {
            y: start.y + dy,
            h: start.h - dy,
            w: start.w + dx,
            ..start
        },
        ResizeEdge::NorthWest => WindowRect {
            x: start.x + dx,
            y: start.y + dy,
            w: start.w - dx,
            h: start.h - dy,
        },
        ResizeEdge::SouthEast => WindowRect {
            w: start.w + dx,
            h: start.h + dy,
            ..start
        },
        ResizeEdge::SouthWest => WindowRect {
            x: start.x + dx,
            w: start.w - dx,
            h: start.h + dy,
            ..start
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWPORT: WindowRect = WindowRect {
        x: 0,
        y: 32,
        w: 1280,
        h: 720,
    };

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, app_id: AppId) -> WindowId {
        reduce_desktop(
            state,
            interaction,
            DesktopAction::OpenApp {
                app_id,
                viewport: VIEWPORT,
            },
        );
        state.window_for_app(app_id).expect("window").id
    }

    fn window<'a>(state: &'a DesktopState, id: WindowId) -> &'a WindowRecord {
        state.windows.iter().find(|w| w.id == id).expect("window")
    }

    #[test]
    fn open_app_creates_centered_window_and_focuses_it() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let id = open(&mut state, &mut interaction, AppId::Pomodoro);
        let record = window(&state, id);

        assert_eq!(state.focused_window_id(), Some(id));
        assert_eq!(record.rect.w, 360);
        assert_eq!(record.rect.x, (1280 - 360) / 2);
        assert!(record.rect.y >= VIEWPORT.y);
    }

    #[test]
    fn open_app_twice_surfaces_the_existing_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = open(&mut state, &mut interaction, AppId::Notes);
        let second = open(&mut state, &mut interaction, AppId::Notes);

        assert_eq!(first, second);
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn z_order_counter_is_strictly_monotonic_across_focus_changes() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = open(&mut state, &mut interaction, AppId::Pomodoro);
        let b = open(&mut state, &mut interaction, AppId::Notes);
        let c = open(&mut state, &mut interaction, AppId::Todo);

        let mut seen = vec![
            window(&state, a).z_index,
            window(&state, b).z_index,
            window(&state, c).z_index,
        ];

        reduce_desktop(&mut state, &mut interaction, DesktopAction::FocusWindow { window_id: a });
        seen.push(window(&state, a).z_index);
        reduce_desktop(&mut state, &mut interaction, DesktopAction::FocusWindow { window_id: b });
        seen.push(window(&state, b).z_index);

        let mut sorted = seen.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(seen, sorted, "every raise takes a fresh, larger z value");
        assert_eq!(state.focused_window_id(), Some(b));
    }

    #[test]
    fn focusing_the_top_window_does_not_burn_a_z_value() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let id = open(&mut state, &mut interaction, AppId::Music);
        let z_before = window(&state, id).z_index;
        let counter_before = state.next_z_index;

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::FocusWindow { window_id: id },
        );

        assert_eq!(window(&state, id).z_index, z_before);
        assert_eq!(state.next_z_index, counter_before);
        assert!(effects.contains(&RuntimeEffect::FocusWindowInput(id)));
    }

    #[test]
    fn minimize_passes_focus_to_next_highest_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let a = open(&mut state, &mut interaction, AppId::Pomodoro);
        let b = open(&mut state, &mut interaction, AppId::Notes);
        let c = open(&mut state, &mut interaction, AppId::Todo);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: c },
        );
        assert_eq!(state.focused_window_id(), Some(b));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: b },
        );
        assert_eq!(state.focused_window_id(), Some(a));

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: a },
        );
        assert_eq!(state.focused_window_id(), None);
    }

    #[test]
    fn dock_toggle_cycles_open_minimize_restore() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let toggle = |state: &mut DesktopState, interaction: &mut InteractionState| {
            reduce_desktop(
                state,
                interaction,
                DesktopAction::ToggleDockApp {
                    app_id: AppId::Asmr,
                    viewport: VIEWPORT,
                },
            )
        };

        toggle(&mut state, &mut interaction);
        let id = state.window_for_app(AppId::Asmr).expect("opened").id;
        assert!(!window(&state, id).minimized);

        // Focused window minimizes on repeat click.
        toggle(&mut state, &mut interaction);
        assert!(window(&state, id).minimized);

        // Minimized window restores and refocuses.
        toggle(&mut state, &mut interaction);
        assert!(!window(&state, id).minimized);
        assert_eq!(state.focused_window_id(), Some(id));

        // A covered (non-focused) window is raised, not minimized.
        open(&mut state, &mut interaction, AppId::Notes);
        toggle(&mut state, &mut interaction);
        assert!(!window(&state, id).minimized);
        assert_eq!(state.focused_window_id(), Some(id));
    }

    #[test]
    fn maximize_then_restore_round_trips_the_rect() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let id = open(&mut state, &mut interaction, AppId::Settings);
        let original = window(&state, id).rect;

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow {
                window_id: id,
                viewport: VIEWPORT,
            },
        );
        assert_eq!(window(&state, id).rect, VIEWPORT);
        assert!(window(&state, id).maximized);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: id },
        );
        assert_eq!(window(&state, id).rect, original);
        assert!(!window(&state, id).maximized);
    }

    #[test]
    fn unminimizing_from_the_dock_keeps_a_maximized_window_maximized() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let id = open(&mut state, &mut interaction, AppId::Notes);
        let original = window(&state, id).rect;
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow {
                window_id: id,
                viewport: VIEWPORT,
            },
        );
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow { window_id: id },
        );

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleDockApp {
                app_id: AppId::Notes,
                viewport: VIEWPORT,
            },
        );

        let record = window(&state, id);
        assert!(!record.minimized);
        assert!(record.maximized, "dock restore must not drop maximization");
        assert_eq!(record.rect, VIEWPORT);
        assert_eq!(record.restore_rect, Some(original));

        // The titlebar restore control still pops the saved geometry.
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: id },
        );
        assert_eq!(window(&state, id).rect, original);
    }

    #[test]
    fn open_size_is_capped_to_a_share_of_the_viewport() {
        let small = WindowRect {
            x: 0,
            y: 32,
            w: 600,
            h: 400,
        };
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        // Notes' preferred 700x520 does not fit a 600x400 desktop.
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::OpenApp {
                app_id: AppId::Notes,
                viewport: small,
            },
        );

        let rect = state.window_for_app(AppId::Notes).expect("window").rect;
        assert_eq!(rect.w, small.w * 4 / 5);
        assert_eq!(rect.h, small.h * 4 / 5);
        assert_eq!(rect, rect.contained_in(small));
    }

    #[test]
    fn restore_rect_is_reclamped_when_the_viewport_shrinks() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let id = open(&mut state, &mut interaction, AppId::Settings);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow {
                window_id: id,
                viewport: VIEWPORT,
            },
        );

        let small = WindowRect {
            x: 0,
            y: 32,
            w: 600,
            h: 400,
        };
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ViewportResized { viewport: small },
        );
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::RestoreWindow { window_id: id },
        );

        let rect = window(&state, id).rect;
        assert_eq!(rect, rect.contained_in(small), "restored window fits the shrunk desktop");
        assert!(rect.w <= small.w);
        assert!(rect.h <= small.h);
    }

    #[test]
    fn drag_clamps_window_inside_viewport() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let id = open(&mut state, &mut interaction, AppId::Todo);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id,
                pointer: PointerPosition { x: 500, y: 300 },
            },
        );
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: -5000, y: -5000 },
                viewport: VIEWPORT,
            },
        );

        let rect = window(&state, id).rect;
        assert_eq!(rect.x, VIEWPORT.x);
        assert_eq!(rect.y, VIEWPORT.y);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: PointerPosition { x: 50_000, y: 50_000 },
                viewport: VIEWPORT,
            },
        );
        let rect = window(&state, id).rect;
        assert_eq!(rect.x + rect.w, VIEWPORT.x + VIEWPORT.w);
        assert_eq!(rect.y + rect.h, VIEWPORT.y + VIEWPORT.h);
    }

    #[test]
    fn resize_respects_minimum_size_and_viewport() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let id = open(&mut state, &mut interaction, AppId::Music);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id,
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        );
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: PointerPosition { x: -10_000, y: -10_000 },
                viewport: VIEWPORT,
            },
        );

        let rect = window(&state, id).rect;
        assert_eq!(rect.w, MIN_WINDOW_WIDTH);
        assert_eq!(rect.h, MIN_WINDOW_HEIGHT);
    }

    #[test]
    fn maximized_window_ignores_move_and_resize() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let id = open(&mut state, &mut interaction, AppId::Notes);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow {
                window_id: id,
                viewport: VIEWPORT,
            },
        );
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id,
                pointer: PointerPosition { x: 10, y: 40 },
            },
        );
        assert_eq!(interaction.dragging, None);
        assert_eq!(window(&state, id).rect, VIEWPORT);
    }

    #[test]
    fn viewport_resize_reclamps_every_window() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let plain = open(&mut state, &mut interaction, AppId::Todo);
        let maxed = open(&mut state, &mut interaction, AppId::Notes);
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::MaximizeWindow {
                window_id: maxed,
                viewport: VIEWPORT,
            },
        );

        let small = WindowRect {
            x: 0,
            y: 32,
            w: 600,
            h: 400,
        };
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ViewportResized { viewport: small },
        );

        let rect = window(&state, plain).rect;
        assert!(rect.x + rect.w <= small.x + small.w);
        assert!(rect.y + rect.h <= small.y + small.h);
        assert_eq!(window(&state, maxed).rect, small);
    }

    #[test]
    fn actions_on_missing_windows_are_silent_noops() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let ghost = WindowId(999);

        for action in [
            DesktopAction::CloseWindow { window_id: ghost },
            DesktopAction::FocusWindow { window_id: ghost },
            DesktopAction::MinimizeWindow { window_id: ghost },
            DesktopAction::RestoreWindow { window_id: ghost },
            DesktopAction::MaximizeWindow {
                window_id: ghost,
                viewport: VIEWPORT,
            },
        ] {
            let effects = reduce_desktop(&mut state, &mut interaction, action);
            assert_eq!(effects, Vec::new());
            assert_eq!(state, DesktopState::default());
        }
    }

    #[test]
    fn timer_completion_emits_cue_and_notification() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        state.settings.focus_secs = 60;
        state.timer.reset(&state.settings);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::TimerStart { now_ms: 0 },
        );
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::TimerTick { now_ms: 61_000 },
        );

        assert!(effects.contains(&RuntimeEffect::PlayCompletionCue));
        assert!(effects.iter().any(|e| matches!(e, RuntimeEffect::Notify { title, .. } if title == "Focus complete")));
        assert_eq!(state.timer.mode, TimerMode::ShortBreak);
    }

    #[test]
    fn timer_completion_cue_is_suppressed_when_sound_disabled() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        state.settings.focus_secs = 60;
        state.settings.sound_enabled = false;
        state.timer.reset(&state.settings);

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::TimerStart { now_ms: 0 },
        );
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::TimerTick { now_ms: 61_000 },
        );

        assert!(!effects.contains(&RuntimeEffect::PlayCompletionCue));
        assert!(effects.iter().any(|e| matches!(e, RuntimeEffect::Notify { .. })));
    }

    #[test]
    fn idle_ticks_do_not_emit_persist_effects() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::TimerTick { now_ms: 5_000 },
        );
        assert_eq!(effects, Vec::new());
    }

    #[test]
    fn applying_duration_changes_resets_an_idle_countdown() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let mut settings = state.settings.clone();
        settings.focus_secs = 50 * 60;
        let effects = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ApplySettings { settings },
        );

        assert_eq!(state.timer.time_left_secs, 50 * 60);
        assert!(effects.contains(&RuntimeEffect::PersistSettings));
        assert!(effects.contains(&RuntimeEffect::PersistTimer));
    }

    #[test]
    fn applying_duration_changes_leaves_a_running_countdown_alone() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::TimerStart { now_ms: 0 },
        );

        let mut settings = state.settings.clone();
        settings.focus_secs = 10 * 60;
        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::ApplySettings { settings },
        );

        assert!(state.timer.is_running);
        assert_eq!(state.timer.duration_at_start_secs, 25 * 60);
    }

    #[test]
    fn hydrating_timer_sanitizes_inconsistent_payloads() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::HydrateTimer {
                timer: TimerState {
                    mode: TimerMode::Focus,
                    time_left_secs: 120,
                    is_running: true,
                    started_at_ms: None,
                    duration_at_start_secs: 1500,
                    sessions_completed: 1,
                },
            },
        );

        assert!(!state.timer.is_running);
        assert_eq!(state.timer.time_left_secs, 120);
    }
}
