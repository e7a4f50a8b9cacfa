//! Lo-fi music player app window contents.
//!
//! Stations are a fixed bundled list; playback goes through the host audio
//! service so only one station plays at a time and volume follows the shared
//! music volume setting.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{
    use_desktop_handle, AppCommand, AppLifecycleEvent, AppMountContext,
};
use leptos::*;
use platform_host::{AudioHandle, AudioService, HostServices};

/// One bundled lo-fi station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Station {
    /// Stable station identifier.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Stream or file URL.
    pub url: &'static str,
}

const STATIONS: [Station; 5] = [
    Station {
        id: "lofi-beats",
        title: "Lo-fi Beats",
        url: "/music/lofi-beats.mp3",
    },
    Station {
        id: "rainy-jazz",
        title: "Rainy Jazz",
        url: "/music/rainy-jazz.mp3",
    },
    Station {
        id: "deep-focus",
        title: "Deep Focus",
        url: "/music/deep-focus.mp3",
    },
    Station {
        id: "night-drive",
        title: "Night Drive",
        url: "/music/night-drive.mp3",
    },
    Station {
        id: "study-piano",
        title: "Study Piano",
        url: "/music/study-piano.mp3",
    },
];

/// Returns the bundled station list.
pub fn stations() -> &'static [Station] {
    &STATIONS
}

fn station_handle(station: &Station) -> AudioHandle {
    AudioHandle::new(format!("music.{}", station.id))
}

/// Silences this app's own channel on teardown. Other apps share the audio
/// service, so closing the player must not touch their channels.
fn release_station(audio: &dyn AudioService, station: &Station, playing: bool) {
    if playing {
        audio.pause(&station_handle(station));
    }
}

#[component]
/// Music player app window contents.
pub fn MusicApp(
    /// Runtime mount context for this window.
    ctx: AppMountContext,
) -> impl IntoView {
    let handle = use_desktop_handle();
    let services = expect_context::<HostServices>();
    let audio = services.audio.clone();

    let selected = create_rw_signal(0usize);
    let playing = create_rw_signal(false);

    let volume = Signal::derive(move || handle.settings.get().music_volume);

    let audio_for_volume = audio.clone();
    create_effect(move |_| {
        let level = volume.get();
        if playing.get_untracked() {
            let station = &STATIONS[selected.get_untracked()];
            audio_for_volume.set_volume(&station_handle(station), level);
        }
    });

    let audio_for_close = audio.clone();
    create_effect(move |_| {
        if ctx.lifecycle.get() == AppLifecycleEvent::Closing {
            release_station(
                audio_for_close.as_ref(),
                &STATIONS[selected.get_untracked()],
                playing.get_untracked(),
            );
            playing.set(false);
        }
    });

    let audio_for_select = audio.clone();
    let host = ctx.host;
    let select_station = move |index: usize| {
        let was_playing = playing.get_untracked();
        if was_playing {
            let previous = &STATIONS[selected.get_untracked()];
            audio_for_select.pause(&station_handle(previous));
        }
        selected.set(index);
        let station = &STATIONS[index];
        host.send(AppCommand::SetWindowTitle {
            title: format!("Music — {}", station.title),
        });
        if was_playing {
            let handle = station_handle(station);
            audio_for_select.ensure(&handle, station.url, true);
            audio_for_select.play(&handle, volume.get_untracked());
        }
    };

    let audio_for_toggle = audio.clone();
    let toggle_playback = move |_| {
        let station = &STATIONS[selected.get_untracked()];
        let handle = station_handle(station);
        if playing.get_untracked() {
            audio_for_toggle.pause(&handle);
            playing.set(false);
        } else {
            audio_for_toggle.ensure(&handle, station.url, true);
            audio_for_toggle.play(&handle, volume.get_untracked());
            playing.set(true);
        }
    };

    view! {
        <div class="app-music">
            <ul class="music-station-list" role="listbox" aria-label="Stations">
                {STATIONS
                    .iter()
                    .enumerate()
                    .map(|(index, station)| {
                        let on_select = select_station.clone();
                        view! {
                            <li>
                                <button
                                    class="music-station"
                                    class:selected=move || selected.get() == index
                                    role="option"
                                    aria-selected=move || (selected.get() == index).to_string()
                                    on:click=move |_| on_select(index)
                                >
                                    {station.title}
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <div class="music-controls">
                <button class="music-toggle" on:click=toggle_playback>
                    {move || if playing.get() { "Pause" } else { "Play" }}
                </button>
                <span class="music-volume-readout">
                    {move || format!("Volume {}%", volume.get())}
                </span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn station_ids_are_unique() {
        let mut ids: Vec<&str> = stations().iter().map(|s| s.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn station_handles_are_namespaced() {
        let handle = station_handle(&STATIONS[0]);
        assert_eq!(handle.0, "music.lofi-beats");
    }

    #[test]
    fn teardown_pauses_only_the_selected_station() {
        let audio = platform_host::RecordingAudioService::default();

        release_station(&audio, &STATIONS[1], true);
        release_station(&audio, &STATIONS[2], false);

        // One targeted pause, nothing global.
        assert_eq!(
            audio.calls(),
            vec![platform_host::AudioCall::Pause(AudioHandle::new("music.rainy-jazz"))]
        );
    }
}
