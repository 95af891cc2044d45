//! Sound player implementation using rodio.
//!
//! `RodioSoundPlayer::play` blocks until the sound has finished. It is meant
//! to run on the dispatcher's background thread, never on the event thread.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, DEFAULT_TONE_DURATION, DEFAULT_TONE_HZ};

/// Volume applied to synthesized tones.
const TONE_AMPLITUDE: f32 = 0.2;

/// A sound player that uses rodio for audio playback.
///
/// The output stream is opened per playback, so the player itself holds no
/// audio resources and can be shared across threads.
pub struct RodioSoundPlayer {
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all sound playback will be silently skipped.
    #[must_use]
    pub fn new(disabled: bool) -> Self {
        Self {
            disabled: AtomicBool::new(disabled),
        }
    }

    /// Plays a sound and waits for it to finish.
    ///
    /// A system sound that cannot be opened or decoded falls back to the
    /// default sine tone.
    ///
    /// # Errors
    ///
    /// Returns an error if no audio output is available.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.is_disabled() {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        let (_stream, handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| SoundError::StreamError(e.to_string()))?;

        match source {
            SoundSource::System { path, name } => {
                debug!("Playing system sound: {}", name);
                match decode_system_sound(path)? {
                    Some(decoder) => sink.append(decoder),
                    None => {
                        warn!("Falling back to tone for system sound '{}'", name);
                        sink.append(sine_tone(DEFAULT_TONE_HZ, DEFAULT_TONE_DURATION));
                    }
                }
            }
            SoundSource::Tone {
                frequency_hz,
                duration,
            } => {
                debug!("Playing tone: {} Hz for {:?}", frequency_hz, duration);
                sink.append(sine_tone(*frequency_hz, *duration));
            }
        }

        sink.sleep_until_end();
        debug!("Sound playback finished");
        Ok(())
    }

    /// Rings the terminal bell unless playback is disabled.
    pub fn bell(&self) {
        if self.is_disabled() {
            return;
        }
        terminal_bell();
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.is_disabled())
            .finish()
    }
}

/// Opens a system sound file. `Ok(None)` means the file is unusable and the
/// tone should be played instead.
fn decode_system_sound(path: &Path) -> Result<Option<Decoder<BufReader<File>>>, SoundError> {
    match open_decoder(path) {
        Ok(decoder) => Ok(Some(decoder)),
        Err(e) if e.should_fallback_to_tone() => {
            debug!("{} ({})", e, e.suggestion());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>, SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    Decoder::new(BufReader::new(file)).map_err(|e| SoundError::DecodeError(e.to_string()))
}

fn sine_tone(frequency_hz: u32, duration: std::time::Duration) -> impl Source<Item = f32> + Send {
    SineWave::new(frequency_hz as f32)
        .take_duration(duration)
        .amplify(TONE_AMPLITUDE)
}

/// Writes the BEL control character to the terminal.
///
/// This is the generic alert signal used when no audio device is available
/// and for the eye-care reminder.
pub fn terminal_bell() {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
        debug!("Failed to ring terminal bell: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Note: playback tests may hit a missing audio device in CI containers;
    // they only check that nothing panics.

    #[test]
    fn test_disabled_player_skips_playback() {
        let player = RodioSoundPlayer::new(true);
        assert!(player.is_disabled());

        let source = SoundSource::tone(1000, Duration::from_millis(10));
        assert!(player.play(&source).is_ok());
    }

    #[test]
    fn test_enable_disable() {
        let player = RodioSoundPlayer::new(true);
        assert!(player.is_disabled());

        player.enable();
        assert!(!player.is_disabled());

        player.disable();
        assert!(player.is_disabled());
    }

    #[test]
    fn test_debug_impl() {
        let player = RodioSoundPlayer::new(false);
        let debug_str = format!("{:?}", player);
        assert!(debug_str.contains("RodioSoundPlayer"));
        assert!(debug_str.contains("disabled"));
    }

    #[test]
    fn test_play_nonexistent_file_does_not_panic() {
        let player = RodioSoundPlayer::new(false);
        let source = SoundSource::system("NonExistent", "/nonexistent/path/to/sound.wav");
        // Ok with a device (tone fallback), DeviceNotAvailable without one
        if let Err(e) = player.play(&source) {
            assert!(e.is_device_error());
        }
    }

    #[test]
    fn test_open_decoder_missing_file() {
        let result = open_decoder(Path::new("/nonexistent/Glass.aiff"));
        assert!(matches!(result, Err(SoundError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_system_sound_falls_back_to_tone() {
        let result = decode_system_sound(Path::new("/nonexistent/Glass.aiff"));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_undecodable_system_sound_falls_back_to_tone() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not an audio file").unwrap();

        match open_decoder(file.path()) {
            Err(e) => {
                assert!(matches!(e, SoundError::DecodeError(_)));
                assert!(e.should_fallback_to_tone());
            }
            Ok(_) => panic!("Expected DecodeError for a text file"),
        }

        assert!(matches!(decode_system_sound(file.path()), Ok(None)));
    }
}
