//! Pomodoro timer app window contents.
//!
//! The countdown itself lives in the desktop shell so it keeps running while
//! this window is closed; the app is a thin control surface over the shared
//! timer handle.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{
    use_desktop_handle, AppMountContext, ShellCommand, TimerMode, TimerState,
};
use leptos::*;

fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

fn cycle_position(sessions_completed: u32, sessions_until_long_break: u32) -> u32 {
    sessions_completed % sessions_until_long_break.max(1)
}

/// Fraction of the current run remaining, in `0.0..=1.0`.
fn remaining_fraction(time_left_secs: u32, duration_at_start_secs: u32) -> f64 {
    if duration_at_start_secs == 0 {
        return 0.0;
    }
    (f64::from(time_left_secs) / f64::from(duration_at_start_secs)).clamp(0.0, 1.0)
}

const RING_RADIUS: f64 = 90.0;
const RING_CIRCUMFERENCE: f64 = 2.0 * std::f64::consts::PI * RING_RADIUS;

#[component]
fn ModeTab(
    mode: TimerMode,
    #[prop(into)] current: Signal<TimerMode>,
) -> impl IntoView {
    let handle = use_desktop_handle();
    view! {
        <button
            class="pomodoro-mode-tab"
            class:active=move || current.get() == mode
            on:click=move |_| handle.send(ShellCommand::SwitchTimerMode(mode))
        >
            {mode.label()}
        </button>
    }
}

#[component]
/// Pomodoro app window contents.
pub fn PomodoroApp(
    /// Runtime mount context for this window.
    ctx: AppMountContext,
) -> impl IntoView {
    let _ = ctx;
    let handle = use_desktop_handle();
    let timer: Signal<TimerState> = handle.timer;

    let mode = Signal::derive(move || timer.get().mode);
    let clock = move || format_clock(timer.get().time_left_secs);
    let running = move || timer.get().is_running;
    let session_text = move || {
        let state = timer.get();
        let cadence = handle.settings.get().sessions_until_long_break;
        format!(
            "Session {} of {}",
            cycle_position(state.sessions_completed, cadence) + 1,
            cadence
        )
    };

    let toggle = move |_| {
        if timer.get_untracked().is_running {
            handle.send(ShellCommand::PauseTimer);
        } else {
            handle.send(ShellCommand::StartTimer);
        }
    };
    let reset = move |_| handle.send(ShellCommand::ResetTimer);

    view! {
        <div class="app-pomodoro">
            <nav class="pomodoro-mode-tabs" aria-label="Timer mode">
                <ModeTab mode=TimerMode::Focus current=mode />
                <ModeTab mode=TimerMode::ShortBreak current=mode />
                <ModeTab mode=TimerMode::LongBreak current=mode />
            </nav>

            <div class="pomodoro-ring">
                <svg viewBox="0 0 200 200" aria-hidden="true">
                    <circle class="pomodoro-ring-track" cx="100" cy="100" r="90" />
                    <circle
                        class="pomodoro-ring-progress"
                        cx="100"
                        cy="100"
                        r="90"
                        stroke-dasharray=format!("{RING_CIRCUMFERENCE:.2}")
                        stroke-dashoffset=move || {
                            let state = timer.get();
                            let fraction = remaining_fraction(
                                state.time_left_secs,
                                state.duration_at_start_secs,
                            );
                            format!("{:.2}", RING_CIRCUMFERENCE * (1.0 - fraction))
                        }
                    />
                </svg>
                <div class="pomodoro-clock" role="timer" aria-live="off">
                    {clock}
                </div>
            </div>

            <p class="pomodoro-session-counter">{session_text}</p>

            <div class="pomodoro-controls">
                <button class="pomodoro-toggle" on:click=toggle>
                    {move || if running() { "Pause" } else { "Start" }}
                </button>
                <button class="pomodoro-reset" on:click=reset>
                    "Reset"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn remaining_fraction_is_clamped_and_zero_safe() {
        assert_eq!(remaining_fraction(1500, 1500), 1.0);
        assert_eq!(remaining_fraction(750, 1500), 0.5);
        assert_eq!(remaining_fraction(0, 1500), 0.0);
        assert_eq!(remaining_fraction(10, 0), 0.0);
    }

    #[test]
    fn cycle_position_wraps_at_the_configured_cadence() {
        assert_eq!(cycle_position(0, 4), 0);
        assert_eq!(cycle_position(3, 4), 3);
        assert_eq!(cycle_position(4, 4), 0);
        assert_eq!(cycle_position(9, 4), 1);
        assert_eq!(cycle_position(3, 2), 1);
        assert_eq!(cycle_position(5, 0), 0);
    }
}
