//! Command definitions for the focus widget.
//!
//! Uses clap derive macro for argument parsing. Without arguments the bare
//! widget is launched.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::timer::parse_duration;
use crate::types::WidgetConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Focus Widget - a minimalist focus timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "focus-widget",
    version,
    about = "ミニマルな集中タイマーウィジェット",
    long_about = "ターミナル上で動作するシンプルな集中タイマー。\n\
                  時間切れで画面全体を点滅させ、20分ごとに目の休憩を促します。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Default focus duration (MM or MM:SS), restored on reset
    #[arg(short, long, value_name = "MM[:SS]", value_parser = validate_duration)]
    pub duration: Option<u32>,

    /// Disable alert sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Disable the eye-care reminder
    #[arg(long)]
    pub no_eye_care: bool,

    /// Write logs to this file (logs are discarded otherwise)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the widget configuration from the flags.
    pub fn widget_config(&self) -> WidgetConfig {
        let mut config = WidgetConfig::default()
            .with_sound(!self.no_sound)
            .with_eye_care_enabled(!self.no_eye_care);
        if let Some(seconds) = self.duration {
            config = config.with_default_duration(seconds);
        }
        config
    }
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the default duration.
///
/// - Must be `MM` or `MM:SS`
/// - Must be at least one second
fn validate_duration(s: &str) -> Result<u32, String> {
    let seconds = parse_duration(s).map_err(|e| format!("{} ({})", e, e.suggestion()))?;
    if seconds == 0 {
        return Err("時間は1秒以上で指定してください".to_string());
    }
    Ok(seconds)
}

// ============================================================================
// Tests
// ============================================================================
