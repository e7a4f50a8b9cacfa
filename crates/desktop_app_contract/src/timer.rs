//! Pomodoro timer state machine.
//!
//! The countdown is reconciled against wall-clock time rather than decremented
//! per tick: every tick recomputes `time_left` from the duration captured when
//! the current run started and the elapsed time since then, so a backgrounded
//! tab that stops ticking still lands on the correct remaining time when ticks
//! resume.

use serde::{Deserialize, Serialize};

use crate::settings::SettingsState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Which countdown the timer is in.
pub enum TimerMode {
    /// A working session.
    Focus,
    /// The break after most focus sessions.
    ShortBreak,
    /// The longer break after every fourth focus session.
    LongBreak,
}

impl TimerMode {
    /// User-facing mode label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Configured duration for this mode.
    pub fn duration_secs(self, settings: &SettingsState) -> u32 {
        match self {
            Self::Focus => settings.focus_secs,
            Self::ShortBreak => settings.short_break_secs,
            Self::LongBreak => settings.long_break_secs,
        }
    }
}

/// Emitted once when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerCompletion {
    /// Mode whose countdown just finished.
    pub finished_mode: TimerMode,
    /// Mode the timer moved into.
    pub next_mode: TimerMode,
    /// Whether the next countdown started automatically.
    pub auto_started: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Persistent pomodoro timer state.
pub struct TimerState {
    /// Active countdown mode.
    pub mode: TimerMode,
    /// Remaining time as of the last reconciliation.
    pub time_left_secs: u32,
    /// Whether a countdown is in flight.
    pub is_running: bool,
    /// Wall-clock anchor of the in-flight run; `None` while paused or idle.
    pub started_at_ms: Option<u64>,
    /// Remaining time when the in-flight run started.
    pub duration_at_start_secs: u32,
    /// Completed focus sessions since the last long break cycle started.
    pub sessions_completed: u32,
}

impl TimerState {
    /// Idle focus-mode timer at the configured full duration.
    pub fn initial(settings: &SettingsState) -> Self {
        Self {
            mode: TimerMode::Focus,
            time_left_secs: settings.focus_secs,
            is_running: false,
            started_at_ms: None,
            duration_at_start_secs: settings.focus_secs,
            sessions_completed: 0,
        }
    }

    /// Starts the countdown, anchoring it to `now_ms`. No-op while running or
    /// when nothing remains.
    pub fn start(&mut self, now_ms: u64) {
        if self.is_running || self.time_left_secs == 0 {
            return;
        }
        self.duration_at_start_secs = self.time_left_secs;
        self.started_at_ms = Some(now_ms);
        self.is_running = true;
    }

    /// Pauses the countdown, freezing the remaining time as of `now_ms`.
    pub fn pause(&mut self, now_ms: u64) {
        if !self.is_running {
            return;
        }
        self.time_left_secs = self.remaining_at(now_ms);
        self.is_running = false;
        self.started_at_ms = None;
        self.duration_at_start_secs = self.time_left_secs;
    }

    /// Stops the countdown and restores the full duration of the current mode.
    pub fn reset(&mut self, settings: &SettingsState) {
        self.is_running = false;
        self.started_at_ms = None;
        self.time_left_secs = self.mode.duration_secs(settings);
        self.duration_at_start_secs = self.time_left_secs;
    }

    /// Switches mode manually, stopping any in-flight countdown.
    pub fn switch_mode(&mut self, mode: TimerMode, settings: &SettingsState) {
        self.mode = mode;
        self.reset(settings);
    }

    /// Reconciles the countdown with the clock. Returns a completion exactly
    /// once per run, on the tick that observes the countdown hitting zero.
    pub fn tick(&mut self, now_ms: u64, settings: &SettingsState) -> Option<TimerCompletion> {
        if !self.is_running {
            return None;
        }
        self.time_left_secs = self.remaining_at(now_ms);
        if self.time_left_secs > 0 {
            return None;
        }

        let finished_mode = self.mode;
        let next_mode = match finished_mode {
            TimerMode::Focus => {
                self.sessions_completed += 1;
                if self.sessions_completed % settings.sessions_until_long_break.max(1) == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Focus,
        };

        let auto_started = match finished_mode {
            TimerMode::Focus => settings.auto_start_breaks,
            TimerMode::ShortBreak | TimerMode::LongBreak => settings.auto_start_pomodoros,
        };

        self.mode = next_mode;
        self.time_left_secs = next_mode.duration_secs(settings);
        self.duration_at_start_secs = self.time_left_secs;
        if auto_started {
            self.started_at_ms = Some(now_ms);
            self.is_running = true;
        } else {
            self.started_at_ms = None;
            self.is_running = false;
        }

        Some(TimerCompletion {
            finished_mode,
            next_mode,
            auto_started,
        })
    }

    /// Sanitizes hydrated state: a run anchor without a running flag (or the
    /// reverse) is treated as paused at the recorded remaining time.
    pub fn sanitized(mut self, settings: &SettingsState) -> Self {
        if self.started_at_ms.is_none() {
            self.is_running = false;
        }
        if !self.is_running {
            self.started_at_ms = None;
            self.duration_at_start_secs = self.time_left_secs;
        }
        let max_duration = self.mode.duration_secs(settings);
        if self.time_left_secs > max_duration {
            self.time_left_secs = max_duration;
            self.duration_at_start_secs = self.duration_at_start_secs.min(max_duration);
        }
        self
    }

    fn remaining_at(&self, now_ms: u64) -> u32 {
        let Some(started_at_ms) = self.started_at_ms else {
            return self.time_left_secs;
        };
        let elapsed_secs = now_ms.saturating_sub(started_at_ms) / 1000;
        u32::try_from(u64::from(self.duration_at_start_secs).saturating_sub(elapsed_secs))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn short_settings() -> SettingsState {
        SettingsState {
            focus_secs: 60,
            short_break_secs: 60,
            long_break_secs: 120,
            ..SettingsState::default()
        }
    }

    #[test]
    fn countdown_reconciles_from_wall_clock_not_tick_count() {
        let settings = short_settings();
        let mut timer = TimerState::initial(&settings);
        timer.start(1_000);

        // Ticks stopped for 42 seconds; one late tick catches up.
        assert_eq!(timer.tick(43_000, &settings), None);
        assert_eq!(timer.time_left_secs, 18);
    }

    #[test]
    fn overshoot_past_zero_clamps_and_completes_once() {
        let settings = short_settings();
        let mut timer = TimerState::initial(&settings);
        timer.start(0);

        let completion = timer.tick(90_000, &settings).expect("completion");
        assert_eq!(completion.finished_mode, TimerMode::Focus);
        assert_eq!(completion.next_mode, TimerMode::ShortBreak);
        assert!(!completion.auto_started);
        assert_eq!(timer.sessions_completed, 1);
        assert_eq!(timer.time_left_secs, 60);
        assert!(!timer.is_running);
        assert_eq!(timer.started_at_ms, None);

        // The timer is idle now, so further ticks cannot double-fire.
        assert_eq!(timer.tick(91_000, &settings), None);
    }

    #[test]
    fn fourth_focus_session_earns_long_break() {
        let settings = short_settings();
        let mut timer = TimerState::initial(&settings);

        for session in 1..=4u32 {
            timer.switch_mode(TimerMode::Focus, &settings);
            let start = u64::from(session) * 1_000_000;
            timer.start(start);
            let completion = timer.tick(start + 60_000, &settings).expect("completion");
            if session == 4 {
                assert_eq!(completion.next_mode, TimerMode::LongBreak);
            } else {
                assert_eq!(completion.next_mode, TimerMode::ShortBreak);
            }
        }
        assert_eq!(timer.sessions_completed, 4);
        assert_eq!(timer.time_left_secs, 120);
    }

    #[test]
    fn long_break_cadence_follows_configured_interval() {
        let mut settings = short_settings();
        settings.sessions_until_long_break = 2;
        let mut timer = TimerState::initial(&settings);

        for session in 1..=2u32 {
            timer.switch_mode(TimerMode::Focus, &settings);
            let start = u64::from(session) * 1_000_000;
            timer.start(start);
            let completion = timer.tick(start + 60_000, &settings).expect("completion");
            if session == 2 {
                assert_eq!(completion.next_mode, TimerMode::LongBreak);
            } else {
                assert_eq!(completion.next_mode, TimerMode::ShortBreak);
            }
        }
        assert_eq!(timer.sessions_completed, 2);
    }

    #[test]
    fn breaks_return_to_focus_and_honor_auto_start() {
        let mut settings = short_settings();
        settings.auto_start_pomodoros = true;
        let mut timer = TimerState::initial(&settings);
        timer.switch_mode(TimerMode::ShortBreak, &settings);
        timer.start(0);

        let completion = timer.tick(60_000, &settings).expect("completion");
        assert_eq!(completion.next_mode, TimerMode::Focus);
        assert!(completion.auto_started);
        assert!(timer.is_running);
        assert_eq!(timer.started_at_ms, Some(60_000));
        assert_eq!(timer.time_left_secs, 60);
    }

    #[test]
    fn pause_freezes_remaining_time_and_reanchors_next_run() {
        let settings = short_settings();
        let mut timer = TimerState::initial(&settings);
        timer.start(0);
        timer.tick(10_000, &settings);
        timer.pause(10_000);

        assert!(!timer.is_running);
        assert_eq!(timer.time_left_secs, 50);

        // A long idle gap while paused must not consume time.
        timer.start(500_000);
        assert_eq!(timer.tick(510_000, &settings), None);
        assert_eq!(timer.time_left_secs, 40);
    }

    #[test]
    fn hydrated_state_without_anchor_is_paused() {
        let settings = short_settings();
        let timer = TimerState {
            mode: TimerMode::Focus,
            time_left_secs: 30,
            is_running: true,
            started_at_ms: None,
            duration_at_start_secs: 60,
            sessions_completed: 2,
        }
        .sanitized(&settings);

        assert!(!timer.is_running);
        assert_eq!(timer.time_left_secs, 30);
        assert_eq!(timer.duration_at_start_secs, 30);
    }
}
