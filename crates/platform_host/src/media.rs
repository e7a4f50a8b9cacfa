//! Media playback boundary contracts.
//!
//! Audio elements are addressed by a stable handle plus a source URL. All
//! operations are fire-and-forget from the caller's perspective: autoplay
//! rejections and other playback failures never propagate, playback simply
//! does not start.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Stable identifier for one audio channel (a station, an ambient sound).
pub struct AudioHandle(pub String);

impl AudioHandle {
    /// Builds a handle from any string-ish id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host service for platform audio playback.
pub trait AudioService {
    /// Registers the source URL for a handle, creating the underlying element
    /// on first use. `looped` marks ambient channels that restart seamlessly.
    fn ensure(&self, handle: &AudioHandle, url: &str, looped: bool);

    /// Starts (or resumes) playback at the given volume in `0..=100`.
    fn play(&self, handle: &AudioHandle, volume: u8);

    /// Pauses playback and rewinds the channel.
    fn pause(&self, handle: &AudioHandle);

    /// Adjusts volume in `0..=100` without touching play state.
    fn set_volume(&self, handle: &AudioHandle, volume: u8);

    /// Stops every channel this service manages.
    fn stop_all(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// Audio service that ignores every operation.
pub struct NoopAudioService;

impl AudioService for NoopAudioService {
    fn ensure(&self, _handle: &AudioHandle, _url: &str, _looped: bool) {}
    fn play(&self, _handle: &AudioHandle, _volume: u8) {}
    fn pause(&self, _handle: &AudioHandle) {}
    fn set_volume(&self, _handle: &AudioHandle, _volume: u8) {}
    fn stop_all(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One recorded audio operation, for assertions in tests.
pub enum AudioCall {
    /// `ensure` was called with this handle/url/loop flag.
    Ensure(AudioHandle, String, bool),
    /// `play` was called with this handle/volume.
    Play(AudioHandle, u8),
    /// `pause` was called with this handle.
    Pause(AudioHandle),
    /// `set_volume` was called with this handle/volume.
    SetVolume(AudioHandle, u8),
    /// `stop_all` was called.
    StopAll,
}

#[derive(Debug, Clone, Default)]
/// Audio service that records every call, as a test double.
pub struct RecordingAudioService {
    calls: Rc<RefCell<Vec<AudioCall>>>,
}

impl RecordingAudioService {
    /// Returns a copy of every recorded call in order.
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls.borrow().clone()
    }
}

impl AudioService for RecordingAudioService {
    fn ensure(&self, handle: &AudioHandle, url: &str, looped: bool) {
        self.calls.borrow_mut().push(AudioCall::Ensure(
            handle.clone(),
            url.to_string(),
            looped,
        ));
    }

    fn play(&self, handle: &AudioHandle, volume: u8) {
        self.calls
            .borrow_mut()
            .push(AudioCall::Play(handle.clone(), volume));
    }

    fn pause(&self, handle: &AudioHandle) {
        self.calls.borrow_mut().push(AudioCall::Pause(handle.clone()));
    }

    fn set_volume(&self, handle: &AudioHandle, volume: u8) {
        self.calls
            .borrow_mut()
            .push(AudioCall::SetVolume(handle.clone(), volume));
    }

    fn stop_all(&self) {
        self.calls.borrow_mut().push(AudioCall::StopAll);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn recording_service_preserves_call_order() {
        let audio = RecordingAudioService::default();
        let rain = AudioHandle::new("rain");
        audio.ensure(&rain, "/sounds/rain.mp3", true);
        audio.play(&rain, 50);
        audio.set_volume(&rain, 80);
        audio.stop_all();

        assert_eq!(
            audio.calls(),
            vec![
                AudioCall::Ensure(rain.clone(), "/sounds/rain.mp3".to_string(), true),
                AudioCall::Play(rain.clone(), 50),
                AudioCall::SetVolume(rain, 80),
                AudioCall::StopAll,
            ]
        );
    }
}
