//! Alert error types.
//!
//! None of these are fatal. Overlay failures degrade the alert to sound only,
//! and stale cycle events are expected when cancellation races teardown.

use thiserror::Error;

/// Errors raised by the alert presenter and overlay hosts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// The overlay could not be created.
    #[error("オーバーレイの作成に失敗しました: {0}")]
    OverlayCreation(String),

    /// The overlay was already torn down.
    #[error("オーバーレイは既に破棄されています: #{0}")]
    OverlayGone(u64),

    /// A cycle event arrived for a session that no longer exists.
    #[error("終了済みのアラートセッションです: #{0}")]
    StaleSession(u64),
}

impl AlertError {
    /// Returns true if the error comes from a callback outliving its target.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::OverlayGone(_) | Self::StaleSession(_))
    }
}
