//! Sound playback for the focus widget.
//!
//! This module provides:
//!
//! - System sound discovery and a synthesized fallback tone
//! - Blocking playback through rodio, run off the event thread
//! - A dispatcher that drops overlapping requests instead of queueing them
//! - The terminal bell as the generic alert signal
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  request()  ┌──────────────────┐
//! │  AlertPresenter  │────────────▶│ SoundDispatcher  │── busy? ──▶ drop
//! └──────────────────┘             └────────┬─────────┘
//!                                           │ spawn "alert-sound"
//!                                           ▼
//!                                  ┌──────────────────┐  error  ┌──────────┐
//!                                  │   SoundPlayer    │────────▶│   bell   │
//!                                  └──────────────────┘         └──────────┘
//! ```

mod dispatcher;
mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crossbeam_channel::{Receiver, Sender};

pub use dispatcher::{Dispatch, SoundDispatcher};
pub use error::SoundError;
pub use player::{terminal_bell, RodioSoundPlayer};
pub use source::{
    alert_sound, discover_system_sounds, find_system_sound, SoundSource, DEFAULT_TONE_DURATION,
    DEFAULT_TONE_HZ,
};

/// Trait for sound playback implementations.
///
/// Implementations are shared with the playback thread, hence `Send + Sync`.
pub trait SoundPlayer: Send + Sync {
    /// Plays a sound from the given source and returns when it has finished.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Emits the generic alert signal.
    fn bell(&self) {
        terminal_bell();
    }

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn bell(&self) {
        RodioSoundPlayer::bell(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    bells: AtomicUsize,
    disabled: AtomicBool,
    should_fail: AtomicBool,
    gate: Mutex<Option<Receiver<()>>>,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Makes every following `play` call block until a message is sent on
    /// the returned channel.
    pub fn hold_playback(&self) -> Sender<()> {
        let (tx, rx) = crossbeam_channel::unbounded();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn bell_count(&self) -> usize {
        self.bells.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
        self.bells.store(0, Ordering::SeqCst);
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::DeviceNotAvailable("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.play_calls.lock().unwrap().push(source.clone());

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
        Ok(())
    }

    fn bell(&self) {
        self.bells.fetch_add(1, Ordering::SeqCst);
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_module_exports() {
        let _: fn(bool) -> RodioSoundPlayer = RodioSoundPlayer::new;
        let _: fn() -> Vec<SoundSource> = discover_system_sounds;
        let _: fn(&str) -> Result<SoundSource, SoundError> = find_system_sound;
    }

    #[test]
    fn test_mock_records_calls() {
        let mock = MockSoundPlayer::new();
        let source = SoundSource::tone(DEFAULT_TONE_HZ, DEFAULT_TONE_DURATION);

        mock.play(&source).unwrap();
        mock.bell();

        assert_eq!(mock.play_count(), 1);
        assert_eq!(mock.get_play_calls(), vec![source]);
        assert_eq!(mock.bell_count(), 1);

        mock.clear_calls();
        assert_eq!(mock.play_count(), 0);
        assert_eq!(mock.bell_count(), 0);
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockSoundPlayer::new();
        mock.set_should_fail(true);

        let result = mock.play(&SoundSource::tone(440, Duration::from_millis(10)));
        assert!(result.unwrap_err().is_device_error());
    }

    #[test]
    fn test_mock_enable_disable() {
        let mock = MockSoundPlayer::new();
        assert!(!mock.is_disabled());
        mock.disable();
        assert!(mock.is_disabled());
        mock.enable();
        assert!(!mock.is_disabled());
    }
}
