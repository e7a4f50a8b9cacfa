//! Ambient sound mixer app window contents.
//!
//! Each sound is an independent looping channel with its own volume; any
//! number can play at once. The mixer snapshot persists per browser through
//! the host preference store.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::collections::BTreeMap;

use desktop_app_contract::{AppLifecycleEvent, AppMountContext};
use leptos::*;
use platform_host::{load_pref_with, save_pref_with, AudioHandle, AudioService, HostServices};
use serde::{Deserialize, Serialize};

/// Preference key holding the persisted mixer snapshot.
pub const MIXER_PREF_KEY: &str = "studydesk.asmr.v1";

const DEFAULT_CHANNEL_VOLUME: u8 = 50;

/// One bundled ambient sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientSound {
    /// Stable sound identifier.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Looping audio source URL.
    pub url: &'static str,
}

const SOUNDS: [AmbientSound; 8] = [
    AmbientSound {
        id: "blizzard",
        title: "Blizzard",
        url: "/sounds/asmr/blizzard.mp3",
    },
    AmbientSound {
        id: "coffee",
        title: "Coffee Shop",
        url: "/sounds/asmr/coffee.mp3",
    },
    AmbientSound {
        id: "fire",
        title: "Fireplace",
        url: "/sounds/asmr/fire.mp3",
    },
    AmbientSound {
        id: "keyboard",
        title: "Keyboard",
        url: "/sounds/asmr/keyboard.mp3",
    },
    AmbientSound {
        id: "ocean",
        title: "Ocean",
        url: "/sounds/asmr/ocean.mp3",
    },
    AmbientSound {
        id: "rain",
        title: "Rain",
        url: "/sounds/asmr/rain.mp3",
    },
    AmbientSound {
        id: "tick",
        title: "Clock Tick",
        url: "/sounds/asmr/tick.mp3",
    },
    AmbientSound {
        id: "waterstream",
        title: "Stream",
        url: "/sounds/asmr/waterstream.mp3",
    },
];

/// Returns the bundled ambient sound list.
pub fn ambient_sounds() -> &'static [AmbientSound] {
    &SOUNDS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// State of one mixer channel.
pub struct ChannelState {
    /// Whether the channel is currently looping.
    pub playing: bool,
    /// Channel volume, 0 to 100.
    pub volume: u8,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            playing: false,
            volume: DEFAULT_CHANNEL_VOLUME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Persisted mixer snapshot keyed by sound id.
pub struct MixerState {
    /// Channel states for sounds the user has touched.
    pub channels: BTreeMap<String, ChannelState>,
}

impl MixerState {
    /// Returns the channel state for a sound, defaulting untouched channels.
    pub fn channel(&self, sound_id: &str) -> ChannelState {
        self.channels.get(sound_id).copied().unwrap_or_default()
    }

    fn set_channel(&mut self, sound_id: &str, channel: ChannelState) {
        self.channels.insert(sound_id.to_string(), channel);
    }

    /// Drops unknown sound ids, clamps volumes, and clears playing flags.
    ///
    /// Playing flags never survive a reload: the browser will not start audio
    /// without a user gesture anyway.
    pub fn sanitized(mut self) -> Self {
        self.channels
            .retain(|id, _| SOUNDS.iter().any(|sound| sound.id == id));
        for channel in self.channels.values_mut() {
            channel.volume = channel.volume.min(100);
            channel.playing = false;
        }
        self
    }
}

fn sound_handle(sound_id: &str) -> AudioHandle {
    AudioHandle::new(format!("asmr.{sound_id}"))
}

/// Pauses every channel this mixer started and clears its playing flags.
/// The audio service is shared with the music player, so neither teardown nor
/// the stop-all control may reach beyond the mixer's own handles.
fn silence_mixer(audio: &dyn AudioService, mixer: &mut MixerState) {
    for (id, channel) in mixer.channels.iter_mut() {
        if channel.playing {
            audio.pause(&sound_handle(id));
            channel.playing = false;
        }
    }
}

#[component]
fn SoundChannel(
    sound: AmbientSound,
    #[prop(into)] mixer: RwSignal<MixerState>,
) -> impl IntoView {
    let services = expect_context::<HostServices>();
    let audio = services.audio.clone();

    let channel = Signal::derive(move || mixer.get().channel(sound.id));

    let audio_for_toggle = audio.clone();
    let toggle = move |_| {
        let mut state = channel.get_untracked();
        let handle = sound_handle(sound.id);
        if state.playing {
            audio_for_toggle.pause(&handle);
            state.playing = false;
        } else {
            audio_for_toggle.ensure(&handle, sound.url, true);
            audio_for_toggle.play(&handle, state.volume);
            state.playing = true;
        }
        mixer.update(|m| m.set_channel(sound.id, state));
    };

    let audio_for_volume = audio.clone();
    let on_volume_input = move |ev| {
        let volume = event_target_value(&ev).parse::<u8>().unwrap_or(0).min(100);
        let mut state = channel.get_untracked();
        state.volume = volume;
        if state.playing {
            audio_for_volume.set_volume(&sound_handle(sound.id), volume);
        }
        mixer.update(|m| m.set_channel(sound.id, state));
    };

    view! {
        <li class="asmr-channel" class:playing=move || channel.get().playing>
            <button class="asmr-toggle" on:click=toggle>
                {sound.title}
            </button>
            <input
                type="range"
                class="asmr-volume"
                min="0"
                max="100"
                prop:value=move || channel.get().volume.to_string()
                aria-label=format!("{} volume", sound.title)
                on:input=on_volume_input
            />
        </li>
    }
}

#[component]
/// Ambient sound mixer app window contents.
pub fn AsmrApp(
    /// Runtime mount context for this window.
    ctx: AppMountContext,
) -> impl IntoView {
    let services = expect_context::<HostServices>();
    let audio = services.audio.clone();
    let prefs = services.prefs.clone();

    let mixer = create_rw_signal(MixerState::default());
    let hydrated = create_rw_signal(false);
    let last_saved = create_rw_signal::<Option<String>>(None);

    let prefs_for_load = prefs.clone();
    spawn_local(async move {
        match load_pref_with::<MixerState>(prefs_for_load.as_ref(), MIXER_PREF_KEY).await {
            Ok(Some(restored)) => {
                let restored = restored.sanitized();
                last_saved.set(serde_json::to_string(&restored).ok());
                mixer.set(restored);
            }
            Ok(None) => {}
            Err(err) => logging::warn!("mixer hydrate failed: {err}"),
        }
        hydrated.set(true);
    });

    create_effect(move |_| {
        if !hydrated.get() {
            return;
        }
        let snapshot = mixer.get();
        let serialized = match serde_json::to_string(&snapshot) {
            Ok(raw) => raw,
            Err(err) => {
                logging::warn!("mixer serialize failed: {err}");
                return;
            }
        };
        if last_saved.get_untracked().as_deref() == Some(serialized.as_str()) {
            return;
        }
        last_saved.set(Some(serialized));

        let prefs = prefs.clone();
        spawn_local(async move {
            if let Err(err) = save_pref_with(prefs.as_ref(), MIXER_PREF_KEY, &snapshot).await {
                logging::warn!("mixer persist failed: {err}");
            }
        });
    });

    let audio_for_close = audio.clone();
    create_effect(move |_| {
        if ctx.lifecycle.get() == AppLifecycleEvent::Closing {
            mixer.update(|m| silence_mixer(audio_for_close.as_ref(), m));
        }
    });

    let stop_all = move |_| {
        mixer.update(|m| silence_mixer(audio.as_ref(), m));
    };

    view! {
        <div class="app-asmr">
            <ul class="asmr-channel-list">
                {SOUNDS
                    .iter()
                    .map(|sound| view! { <SoundChannel sound=*sound mixer=mixer /> })
                    .collect_view()}
            </ul>
            <div class="asmr-footer">
                <button class="asmr-stop-all" on:click=stop_all>
                    "Stop all"
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
    fn untouched_channel_defaults_to_half_volume() {
        let mixer = MixerState::default();
        let channel = mixer.channel("rain");
        assert_eq!(channel.volume, DEFAULT_CHANNEL_VOLUME);
        assert!(!channel.playing);
    }

    #[test]
    fn sanitize_drops_unknown_ids_and_clears_playing() {
        let mut mixer = MixerState::default();
        mixer.set_channel(
            "rain",
            ChannelState {
                playing: true,
                volume: 80,
            },
        );
        mixer.set_channel(
            "not-a-sound",
            ChannelState {
                playing: true,
                volume: 10,
            },
        );
        let clean = mixer.sanitized();
        assert_eq!(clean.channels.len(), 1);
        let rain = clean.channel("rain");
        assert_eq!(rain.volume, 80);
        assert!(!rain.playing);
    }

    #[test]
    fn silencing_pauses_only_channels_the_mixer_started() {
        let audio = platform_host::RecordingAudioService::default();
        let mut mixer = MixerState::default();
        mixer.set_channel(
            "rain",
            ChannelState {
                playing: true,
                volume: 80,
            },
        );
        mixer.set_channel(
            "fire",
            ChannelState {
                playing: false,
                volume: 30,
            },
        );

        silence_mixer(&audio, &mut mixer);

        // One targeted pause; nothing global that would silence other apps.
        assert_eq!(
            audio.calls(),
            vec![platform_host::AudioCall::Pause(AudioHandle::new("asmr.rain"))]
        );
        assert!(!mixer.channel("rain").playing);
        assert_eq!(mixer.channel("fire").volume, 30);
    }

    #[test]
    fn sanitize_clamps_out_of_range_volume() {
        let raw = r#"{"channels":{"fire":{"playing":false,"volume":250}}}"#;
        let mixer: MixerState = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(mixer.sanitized().channel("fire").volume, 100);
    }
}
