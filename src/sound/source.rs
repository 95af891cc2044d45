//! Sound source management.
//!
//! An alert tone is either a system sound file (macOS ships `Glass.aiff`)
//! or a sine tone synthesized at playback time.

use std::path::PathBuf;
use std::time::Duration;

use super::error::SoundError;
use crate::types::WidgetConfig;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// A system sound file from `/System/Library/Sounds/` or similar.
    System {
        /// The name of the sound (e.g., "Glass").
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// A synthesized sine tone.
    Tone {
        /// Frequency in hertz.
        frequency_hz: u32,
        /// Length of the tone.
        duration: Duration,
    },
}

impl SoundSource {
    /// Creates a new system sound source.
    #[must_use]
    pub fn system(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::System {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a new synthesized tone source.
    #[must_use]
    pub fn tone(frequency_hz: u32, duration: Duration) -> Self {
        Self::Tone {
            frequency_hz,
            duration,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::System { name, .. } => name,
            Self::Tone { .. } => "tone",
        }
    }

    /// Returns true if this is a system sound.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }

    /// Returns true if this is a synthesized tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }

    /// Returns the file path if this is a system sound.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::System { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

/// Frequency of the fallback tone.
pub const DEFAULT_TONE_HZ: u32 = 1000;

/// Length of the fallback tone.
pub const DEFAULT_TONE_DURATION: Duration = Duration::from_millis(200);

/// Directories to search for system sounds, in order of priority.
const SYSTEM_SOUND_DIRS: &[&str] = &["/System/Library/Sounds", "/Library/Sounds"];

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["aiff", "wav", "mp3", "m4a", "flac"];

/// Preferred alert sound names, in order of preference.
const ALERT_SOUND_NAMES: &[&str] = &["Glass", "Ping"];

/// Discovers available system sounds.
///
/// Returns an empty vector if no sounds are found (e.g., on Linux).
#[must_use]
pub fn discover_system_sounds() -> Vec<SoundSource> {
    let mut sounds = Vec::new();

    for dir in SYSTEM_SOUND_DIRS {
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };

        for entry in entries.flatten() {
            let file_path = entry.path();
            let supported = file_path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
            if !supported {
                continue;
            }
            if let Some(stem) = file_path.file_stem() {
                sounds.push(SoundSource::System {
                    name: stem.to_string_lossy().into_owned(),
                    path: file_path,
                });
            }
        }
    }

    // Sort by name for consistent ordering
    sounds.sort_by(|a, b| a.name().cmp(b.name()));
    sounds
}

/// Finds a system sound by name (case-insensitive).
///
/// # Errors
///
/// Returns `SoundError::FileNotFound` if no sound with the given name exists.
pub fn find_system_sound(name: &str) -> Result<SoundSource, SoundError> {
    discover_system_sounds()
        .into_iter()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| SoundError::FileNotFound(format!("System sound '{}' not found", name)))
}

/// Picks the sound played on every visible alert phase.
///
/// Prefers a system alert sound and falls back to the configured sine tone.
#[must_use]
pub fn alert_sound(config: &WidgetConfig) -> SoundSource {
    ALERT_SOUND_NAMES
        .iter()
        .find_map(|preferred| find_system_sound(preferred).ok())
        .unwrap_or_else(|| SoundSource::tone(config.tone_frequency_hz, config.tone_duration))
}
