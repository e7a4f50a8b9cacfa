//! `HtmlAudioElement`-backed media adapter.
//!
//! Channels are lazily created per handle and reused for the lifetime of the
//! page. Playback failures (autoplay restrictions) are swallowed: the promise
//! rejection is dropped and playback simply does not start, matching the
//! boundary's fire-and-forget contract.

#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, collections::HashMap};

use platform_host::{AudioHandle, AudioService};

#[cfg(target_arch = "wasm32")]
thread_local! {
    static AUDIO_ELEMENTS: RefCell<HashMap<AudioHandle, web_sys::HtmlAudioElement>> =
        RefCell::new(HashMap::new());
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser audio adapter addressing one `HtmlAudioElement` per handle.
pub struct WebAudioService;

#[cfg(target_arch = "wasm32")]
fn with_element<R>(
    handle: &AudioHandle,
    f: impl FnOnce(&web_sys::HtmlAudioElement) -> R,
) -> Option<R> {
    AUDIO_ELEMENTS.with(|elements| elements.borrow().get(handle).map(f))
}

#[cfg(target_arch = "wasm32")]
fn clamped_gain(volume: u8) -> f64 {
    f64::from(volume.min(100)) / 100.0
}

impl AudioService for WebAudioService {
    fn ensure(&self, handle: &AudioHandle, url: &str, looped: bool) {
        #[cfg(target_arch = "wasm32")]
        {
            AUDIO_ELEMENTS.with(|elements| {
                let mut elements = elements.borrow_mut();
                if elements.contains_key(handle) {
                    return;
                }
                match web_sys::HtmlAudioElement::new_with_src(url) {
                    Ok(element) => {
                        element.set_loop(looped);
                        elements.insert(handle.clone(), element);
                    }
                    Err(err) => {
                        web_sys::console::debug_1(
                            &format!("audio element create failed for {handle}: {err:?}").into(),
                        );
                    }
                }
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (handle, url, looped);
        }
    }

    fn play(&self, handle: &AudioHandle, volume: u8) {
        #[cfg(target_arch = "wasm32")]
        {
            with_element(handle, |element| {
                element.set_volume(clamped_gain(volume));
                // Autoplay rejections are intentionally dropped.
                let _ = element.play();
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (handle, volume);
        }
    }

    fn pause(&self, handle: &AudioHandle) {
        #[cfg(target_arch = "wasm32")]
        {
            with_element(handle, |element| {
                let _ = element.pause();
                element.set_current_time(0.0);
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = handle;
        }
    }

    fn set_volume(&self, handle: &AudioHandle, volume: u8) {
        #[cfg(target_arch = "wasm32")]
        {
            with_element(handle, |element| element.set_volume(clamped_gain(volume)));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (handle, volume);
        }
    }

    fn stop_all(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            AUDIO_ELEMENTS.with(|elements| {
                for element in elements.borrow().values() {
                    let _ = element.pause();
                    element.set_current_time(0.0);
                }
            });
        }
    }
}
