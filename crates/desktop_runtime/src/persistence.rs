//! Versioned preference keys and typed load/save helpers for runtime state.
//!
//! Window layout is deliberately session-only: every boot starts with an empty
//! desktop, and only settings and the timer survive a reload.

use desktop_app_contract::settings::SettingsState;
use desktop_app_contract::timer::TimerState;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};

pub const SETTINGS_PREF_KEY: &str = "studydesk.settings.v1";
pub const TIMER_PREF_KEY: &str = "studydesk.timer.v1";

/// Loads persisted settings, if present and well-formed.
pub async fn load_settings(prefs: &dyn PrefsStore) -> Option<SettingsState> {
    match load_pref_with::<SettingsState>(prefs, SETTINGS_PREF_KEY).await {
        Ok(settings) => settings,
        Err(err) => {
            leptos::logging::warn!("settings hydrate failed: {err}");
            None
        }
    }
}

/// Loads persisted timer state, if present and well-formed.
pub async fn load_timer(prefs: &dyn PrefsStore) -> Option<TimerState> {
    match load_pref_with::<TimerState>(prefs, TIMER_PREF_KEY).await {
        Ok(timer) => timer,
        Err(err) => {
            leptos::logging::warn!("timer hydrate failed: {err}");
            None
        }
    }
}

/// Persists the settings snapshot.
///
/// # Errors
///
/// Returns an error when serialization or the underlying store write fails.
pub async fn persist_settings(
    prefs: &dyn PrefsStore,
    settings: &SettingsState,
) -> Result<(), String> {
    save_pref_with(prefs, SETTINGS_PREF_KEY, settings).await
}

/// Persists the timer snapshot.
///
/// # Errors
///
/// Returns an error when serialization or the underlying store write fails.
pub async fn persist_timer(prefs: &dyn PrefsStore, timer: &TimerState) -> Result<(), String> {
    save_pref_with(prefs, TIMER_PREF_KEY, timer).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::MemoryPrefsStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use desktop_app_contract::settings::ThemeMode;

    #[test]
    fn settings_round_trip_through_prefs_store() {
        let prefs = MemoryPrefsStore::default();
        let mut settings = SettingsState::default();
        settings.theme = ThemeMode::Light;
        settings.music_volume = 35;

        block_on(persist_settings(&prefs, &settings)).expect("persist");
        let loaded = block_on(load_settings(&prefs)).expect("present");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn timer_round_trip_preserves_run_anchor() {
        let prefs = MemoryPrefsStore::default();
        let settings = SettingsState::default();
        let mut timer = TimerState::initial(&settings);
        timer.start(1_700_000_000_000);

        block_on(persist_timer(&prefs, &timer)).expect("persist");
        let loaded = block_on(load_timer(&prefs)).expect("present");
        assert_eq!(loaded, timer);
        assert_eq!(loaded.started_at_ms, Some(1_700_000_000_000));
    }

    #[test]
    fn corrupted_payloads_hydrate_as_absent() {
        let prefs = MemoryPrefsStore::default();
        block_on(prefs.save_pref(SETTINGS_PREF_KEY, "{\"theme\": 42}")).expect("save raw");
        assert_eq!(block_on(load_settings(&prefs)), None);
    }
}
