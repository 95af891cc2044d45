//! Duration input error types.

use thiserror::Error;

/// Errors returned by the duration input parser.
///
/// Callers recover from both by keeping the previous duration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The input does not look like `MM` or `MM:SS`.
    #[error("時間の形式が不正です: {0:?}")]
    InvalidFormat(String),

    /// The input is well-formed but does not fit in seconds.
    #[error("時間が大きすぎます: {0:?}")]
    OutOfRange(String),
}

impl InputError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidFormat(input) | Self::OutOfRange(input) => input,
        }
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "MM または MM:SS の形式で入力してください",
            Self::OutOfRange(_) => "より短い時間を入力してください",
        }
    }
}
