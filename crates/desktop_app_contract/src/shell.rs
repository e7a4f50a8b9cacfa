//! Shell state handle shared with hosted apps.
//!
//! Apps never mutate desktop state directly: they read the shared signals and
//! send [`ShellCommand`] values for the runtime reducer to apply. Wall-clock
//! stamping of timer commands happens runtime-side so app code stays
//! deterministic.

use leptos::{use_context, Callable, Callback, Signal};

use crate::settings::SettingsState;
use crate::timer::{TimerMode, TimerState};

#[derive(Debug, Clone, PartialEq)]
/// Desktop-level commands an app may send to the shell.
pub enum ShellCommand {
    /// Start the pomodoro countdown.
    StartTimer,
    /// Pause the pomodoro countdown.
    PauseTimer,
    /// Reset the countdown to the current mode's full duration.
    ResetTimer,
    /// Switch the timer mode manually.
    SwitchTimerMode(TimerMode),
    /// Replace desktop settings wholesale.
    ApplySettings(SettingsState),
}

#[derive(Clone, Copy)]
/// Read signals plus command channel the runtime provides to every app.
pub struct DesktopHandle {
    /// Current desktop settings.
    pub settings: Signal<SettingsState>,
    /// Current timer state.
    pub timer: Signal<TimerState>,
    /// Command channel into the shell reducer.
    pub commands: Callback<ShellCommand>,
}

impl DesktopHandle {
    /// Sends a shell command to the runtime.
    pub fn send(&self, command: ShellCommand) {
        self.commands.call(command);
    }
}

/// Returns the [`DesktopHandle`] provided by the hosting runtime.
///
/// # Panics
///
/// Panics if called outside a desktop runtime provider.
pub fn use_desktop_handle() -> DesktopHandle {
    use_context::<DesktopHandle>().expect("DesktopHandle not provided")
}
