//! Display utilities for the focus widget CLI.
//!
//! This module provides formatted output for:
//! - The session summary printed after the widget closes
//! - Error messages

use crate::timer::format_clock;
use crate::types::TimerState;
use crate::widget::SessionSummary;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the summary of a closed widget.
    pub fn show_summary(summary: &SessionSummary) {
        for line in Self::summary_lines(summary) {
            println!("{}", line);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Formats the summary of a closed widget.
    fn summary_lines(summary: &SessionSummary) -> Vec<String> {
        let headline = match summary.state {
            TimerState::Idle => "タイマーは開始されませんでした",
            TimerState::Running => "タイマー実行中に終了しました",
            TimerState::Paused => "一時停止中に終了しました",
            TimerState::Alarmed => "* 時間になりました",
            TimerState::Completed => "* タイマーを完了しました",
        };

        let mut lines = vec![headline.to_string()];
        if let Some(task) = &summary.task_name {
            lines.push(format!("  タスク: {}", task));
        }
        if summary.state != TimerState::Idle {
            lines.push(format!("  残り時間: {}", format_clock(summary.remaining_seconds)));
        }
        lines
    }
}

// ============================================================================
// Tests
// ============================================================================
