//! Desktop-wide user settings: appearance, audio levels, and timer durations.

use platform_host::WallpaperSelection;
use serde::{Deserialize, Serialize};

/// Shipped accent color.
pub const DEFAULT_ACCENT_COLOR: &str = "#FF9900";
/// Shipped focus session length.
pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;
/// Shipped short break length.
pub const DEFAULT_SHORT_BREAK_SECS: u32 = 5 * 60;
/// Shipped long break length.
pub const DEFAULT_LONG_BREAK_SECS: u32 = 15 * 60;
/// Shipped long-break cadence: focus sessions completed before a long break.
pub const DEFAULT_SESSIONS_UNTIL_LONG_BREAK: u32 = 4;

const MIN_DURATION_SECS: u32 = 60;
const MAX_DURATION_SECS: u32 = 4 * 60 * 60;
const MAX_SESSIONS_UNTIL_LONG_BREAK: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Light/dark appearance mode.
pub enum ThemeMode {
    /// Dark appearance (default).
    Dark,
    /// Light appearance.
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Desktop-wide user settings.
pub struct SettingsState {
    /// Appearance mode.
    pub theme: ThemeMode,
    /// Accent color as a CSS hex string.
    pub accent_color: String,
    /// Selected wallpaper from the built-in catalog.
    pub wallpaper: WallpaperSelection,
    /// 0..=100 gain applied to music playback.
    pub music_volume: u8,
    /// 0..=100 gain applied to completion cues and notification sounds.
    pub notification_volume: u8,
    /// Focus session length in seconds.
    pub focus_secs: u32,
    /// Short break length in seconds.
    pub short_break_secs: u32,
    /// Long break length in seconds.
    pub long_break_secs: u32,
    /// Focus sessions completed before the next break is a long one.
    pub sessions_until_long_break: u32,
    /// Whether timer completion plays an audio cue.
    pub sound_enabled: bool,
    /// Whether breaks start automatically after a focus session completes.
    pub auto_start_breaks: bool,
    /// Whether focus sessions start automatically after a break completes.
    pub auto_start_pomodoros: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            wallpaper: WallpaperSelection::default(),
            music_volume: 50,
            notification_volume: 70,
            focus_secs: DEFAULT_FOCUS_SECS,
            short_break_secs: DEFAULT_SHORT_BREAK_SECS,
            long_break_secs: DEFAULT_LONG_BREAK_SECS,
            sessions_until_long_break: DEFAULT_SESSIONS_UNTIL_LONG_BREAK,
            sound_enabled: true,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
        }
    }
}

impl SettingsState {
    /// Clamps out-of-range values after hydration or user edits.
    pub fn sanitized(mut self) -> Self {
        self.music_volume = self.music_volume.min(100);
        self.notification_volume = self.notification_volume.min(100);
        self.focus_secs = self.focus_secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
        self.short_break_secs = self
            .short_break_secs
            .clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
        self.long_break_secs = self
            .long_break_secs
            .clamp(MIN_DURATION_SECS, MAX_DURATION_SECS);
        self.sessions_until_long_break = self
            .sessions_until_long_break
            .clamp(1, MAX_SESSIONS_UNTIL_LONG_BREAK);
        if self.accent_color.trim().is_empty() {
            self.accent_color = DEFAULT_ACCENT_COLOR.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sanitize_clamps_volumes_and_durations() {
        let settings = SettingsState {
            music_volume: 180,
            notification_volume: 101,
            focus_secs: 5,
            short_break_secs: 0,
            long_break_secs: 999_999,
            sessions_until_long_break: 0,
            accent_color: "  ".to_string(),
            ..SettingsState::default()
        }
        .sanitized();

        assert_eq!(settings.music_volume, 100);
        assert_eq!(settings.notification_volume, 100);
        assert_eq!(settings.focus_secs, MIN_DURATION_SECS);
        assert_eq!(settings.short_break_secs, MIN_DURATION_SECS);
        assert_eq!(settings.long_break_secs, MAX_DURATION_SECS);
        assert_eq!(settings.sessions_until_long_break, 1);
        assert_eq!(settings.accent_color, DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn defaults_match_shipped_configuration() {
        let settings = SettingsState::default();
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.focus_secs, 1500);
        assert_eq!(settings.short_break_secs, 300);
        assert_eq!(settings.long_break_secs, 900);
        assert_eq!(settings.sessions_until_long_break, 4);
        assert_eq!(settings.music_volume, 50);
        assert_eq!(settings.notification_volume, 70);
        assert!(settings.sound_enabled);
        assert!(!settings.auto_start_breaks);
        assert!(!settings.auto_start_pomodoros);
    }
}
