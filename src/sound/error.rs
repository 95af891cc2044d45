//! Sound system error types.
//!
//! Every sound error is recoverable, so these mainly feed the debug log.

use thiserror::Error;

/// Errors from opening the audio output or a system sound file.
///
/// File errors are recovered inside the player by the sine tone; device
/// and stream errors reach the dispatcher, which rings the bell.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No default output device (headless session, no sound server).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// The system sound file does not exist or cannot be opened.
    #[error("サウンドファイルが見つかりません: {0}")]
    FileNotFound(String),

    /// The system sound file is not in a format rodio can decode.
    #[error("サウンドファイルのデコードに失敗しました: {0}")]
    DecodeError(String),

    /// The output device exists but no sink could be attached.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns true if the player should play the sine tone instead.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        self.is_file_error()
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "ターミナルのベルで代替します",
            Self::FileNotFound(_) => "合成音で再生を試みます",
            Self::DecodeError(_) => "サウンドファイルが破損している可能性があります",
            Self::StreamError(_) => "オーディオ設定を確認してください",
        }
    }
}
