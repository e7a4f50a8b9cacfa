//! Settings app window contents for theme, wallpaper, audio, and timer
//! preferences.
//!
//! Every control applies immediately: the app reads the shared settings
//! signal, edits one field, and sends the whole snapshot back through the
//! shell command channel. The reducer sanitizes and persists it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{
    use_desktop_handle, AppMountContext, DesktopHandle, SettingsState, ShellCommand, ThemeMode,
};
use leptos::*;
use platform_host::{
    image_wallpapers, online_wallpapers, video_wallpapers, WallpaperEntry,
};

fn apply(handle: DesktopHandle, edit: impl FnOnce(&mut SettingsState)) {
    let mut settings = handle.settings.get_untracked();
    edit(&mut settings);
    handle.send(ShellCommand::ApplySettings(settings));
}

fn parse_minutes(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().map(|m| m.saturating_mul(60))
}

#[component]
fn WallpaperGroup(
    label: &'static str,
    entries: &'static [WallpaperEntry],
) -> impl IntoView {
    let handle = use_desktop_handle();
    let selected_id = Signal::derive(move || handle.settings.get().wallpaper.wallpaper_id);

    view! {
        <fieldset class="settings-wallpaper-group">
            <legend>{label}</legend>
            <div class="settings-wallpaper-grid">
                {entries
                    .iter()
                    .map(|entry| {
                        let id = entry.id;
                        view! {
                            <button
                                class="settings-wallpaper-option"
                                class:selected=move || selected_id.get() == id
                                title=format!("{} — {}", entry.title, entry.author)
                                on:click=move |_| {
                                    apply(handle, |s| s.wallpaper.wallpaper_id = id.to_string());
                                }
                            >
                                {entry.title}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </fieldset>
    }
}

#[component]
fn VolumeSlider(
    label: &'static str,
    #[prop(into)] value: Signal<u8>,
    #[prop(into)] on_change: Callback<u8>,
) -> impl IntoView {
    view! {
        <label class="settings-volume">
            <span>{label}</span>
            <input
                type="range"
                min="0"
                max="100"
                prop:value=move || value.get().to_string()
                on:input=move |ev| {
                    let volume = event_target_value(&ev).parse::<u8>().unwrap_or(0).min(100);
                    on_change.call(volume);
                }
            />
            <span class="settings-volume-readout">{move || format!("{}%", value.get())}</span>
        </label>
    }
}

#[component]
fn DurationField(
    label: &'static str,
    #[prop(into)] secs: Signal<u32>,
    #[prop(into)] on_change: Callback<u32>,
) -> impl IntoView {
    view! {
        <label class="settings-duration">
            <span>{label}</span>
            <input
                type="number"
                min="1"
                max="240"
                prop:value=move || (secs.get() / 60).to_string()
                on:change=move |ev| {
                    if let Some(new_secs) = parse_minutes(&event_target_value(&ev)) {
                        on_change.call(new_secs);
                    }
                }
            />
            <span>"min"</span>
        </label>
    }
}

#[component]
fn ToggleField(
    label: &'static str,
    #[prop(into)] checked: Signal<bool>,
    #[prop(into)] on_change: Callback<bool>,
) -> impl IntoView {
    view! {
        <label class="settings-toggle">
            <input
                type="checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.call(event_target_checked(&ev))
            />
            <span>{label}</span>
        </label>
    }
}

#[component]
/// Settings app window contents.
pub fn SettingsApp(
    /// Runtime mount context for this window.
    ctx: AppMountContext,
) -> impl IntoView {
    let _ = ctx;
    let handle = use_desktop_handle();
    let settings = handle.settings;

    let theme = Signal::derive(move || settings.get().theme);
    let accent = Signal::derive(move || settings.get().accent_color);

    view! {
        <div class="app-settings">
            <section class="settings-section">
                <h2>"Appearance"</h2>
                <div class="settings-theme-row">
                    <button
                        class="settings-theme-option"
                        class:selected=move || theme.get() == ThemeMode::Dark
                        on:click=move |_| apply(handle, |s| s.theme = ThemeMode::Dark)
                    >
                        "Dark"
                    </button>
                    <button
                        class="settings-theme-option"
                        class:selected=move || theme.get() == ThemeMode::Light
                        on:click=move |_| apply(handle, |s| s.theme = ThemeMode::Light)
                    >
                        "Light"
                    </button>
                </div>
                <label class="settings-accent">
                    <span>"Accent color"</span>
                    <input
                        type="color"
                        prop:value=move || accent.get()
                        on:input=move |ev| {
                            let color = event_target_value(&ev);
                            apply(handle, |s| s.accent_color = color);
                        }
                    />
                </label>
            </section>

            <section class="settings-section">
                <h2>"Wallpaper"</h2>
                <WallpaperGroup label="Images" entries=image_wallpapers() />
                <WallpaperGroup label="Videos" entries=video_wallpapers() />
                <WallpaperGroup label="Online" entries=online_wallpapers() />
            </section>

            <section class="settings-section">
                <h2>"Sound"</h2>
                <VolumeSlider
                    label="Music volume"
                    value=Signal::derive(move || settings.get().music_volume)
                    on_change=Callback::new(move |volume| {
                        apply(handle, |s| s.music_volume = volume)
                    })
                />
                <VolumeSlider
                    label="Notification volume"
                    value=Signal::derive(move || settings.get().notification_volume)
                    on_change=Callback::new(move |volume| {
                        apply(handle, |s| s.notification_volume = volume)
                    })
                />
                <ToggleField
                    label="Play sound when a timer completes"
                    checked=Signal::derive(move || settings.get().sound_enabled)
                    on_change=Callback::new(move |enabled| {
                        apply(handle, |s| s.sound_enabled = enabled)
                    })
                />
            </section>

            <section class="settings-section">
                <h2>"Timer"</h2>
                <DurationField
                    label="Focus"
                    secs=Signal::derive(move || settings.get().focus_secs)
                    on_change=Callback::new(move |secs| apply(handle, |s| s.focus_secs = secs))
                />
                <DurationField
                    label="Short break"
                    secs=Signal::derive(move || settings.get().short_break_secs)
                    on_change=Callback::new(move |secs| {
                        apply(handle, |s| s.short_break_secs = secs)
                    })
                />
                <DurationField
                    label="Long break"
                    secs=Signal::derive(move || settings.get().long_break_secs)
                    on_change=Callback::new(move |secs| {
                        apply(handle, |s| s.long_break_secs = secs)
                    })
                />
                <label class="settings-duration">
                    <span>"Sessions before long break"</span>
                    <input
                        type="number"
                        min="1"
                        max="12"
                        prop:value=move || settings.get().sessions_until_long_break.to_string()
                        on:change=move |ev| {
                            if let Ok(cadence) = event_target_value(&ev).trim().parse::<u32>() {
                                apply(handle, |s| s.sessions_until_long_break = cadence);
                            }
                        }
                    />
                    <span>"sessions"</span>
                </label>
                <ToggleField
                    label="Auto-start breaks"
                    checked=Signal::derive(move || settings.get().auto_start_breaks)
                    on_change=Callback::new(move |enabled| {
                        apply(handle, |s| s.auto_start_breaks = enabled)
                    })
                />
                <ToggleField
                    label="Auto-start focus sessions"
                    checked=Signal::derive(move || settings.get().auto_start_pomodoros)
                    on_change=Callback::new(move |enabled| {
                        apply(handle, |s| s.auto_start_pomodoros = enabled)
                    })
                />
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn minutes_parse_to_seconds() {
        assert_eq!(parse_minutes("25"), Some(1500));
        assert_eq!(parse_minutes(" 5 "), Some(300));
    }

    #[test]
    fn junk_minutes_are_rejected() {
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("-3"), None);
        assert_eq!(parse_minutes("abc"), None);
    }
}
