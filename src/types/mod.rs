//! Core data types for the focus widget.
//!
//! This module defines the data structures used for:
//! - Timer and eye-care phases
//! - Scheduled wakeups dispatched by the widget
//! - Colors and the widget palette
//! - Widget configuration with validation

use std::fmt;
use std::time::Duration;

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the main focus timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Not started, or reset
    #[default]
    Idle,
    /// Counting down once per second
    Running,
    /// Stopped with the remaining time preserved
    Paused,
    /// Countdown reached zero, alert active
    Alarmed,
    /// Finished early by the user
    Completed,
}

impl TimerState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Idle => "idle",
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Alarmed => "alarmed",
            TimerState::Completed => "completed",
        }
    }

    /// Returns true if the text fields accept edits in this state.
    pub fn inputs_enabled(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true for the states that only a reset leaves.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TimerState::Alarmed | TimerState::Completed)
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// EyeCarePhase
// ============================================================================

/// Phase of the eye-care reminder cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EyeCarePhase {
    /// Looking at the screen
    #[default]
    Work,
    /// Looking away from the screen
    Relax,
}

impl EyeCarePhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            EyeCarePhase::Work => "work",
            EyeCarePhase::Relax => "relax",
        }
    }

    /// Returns the phase that follows this one.
    pub fn next(self) -> Self {
        match self {
            EyeCarePhase::Work => EyeCarePhase::Relax,
            EyeCarePhase::Relax => EyeCarePhase::Work,
        }
    }
}

impl fmt::Display for EyeCarePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Wakeup
// ============================================================================

/// Events the widget schedules for itself.
///
/// Each variant is owned by exactly one component, which holds the
/// cancel token for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// One second of the main countdown elapsed
    CountdownTick,
    /// Toggle the alarmed text color
    TextBlink,
    /// Toggle the overlay border of an alert session
    AlertCycle {
        /// Session the cycle belongs to
        session: u64,
    },
    /// One second of the eye-care cycle elapsed
    EyeCareTick,
}

// ============================================================================
// Rgb / Palette
// ============================================================================

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colors used by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_main: Rgb,
    pub text_main: Rgb,
    pub text_meta: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub danger: Rgb,
    pub border: Rgb,
    pub grip: Rgb,
    /// Second color of the alarmed blink cycle
    pub white: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg_main: Rgb::new(0x1E, 0x1E, 0x1E),
            text_main: Rgb::new(0xF5, 0xF5, 0xF7),
            text_meta: Rgb::new(0x86, 0x86, 0x8B),
            accent: Rgb::new(0xFF, 0xD6, 0x0A),
            success: Rgb::new(0x30, 0xD1, 0x58),
            danger: Rgb::new(0xFF, 0x45, 0x3A),
            border: Rgb::new(0x33, 0x33, 0x33),
            grip: Rgb::new(0x55, 0x55, 0x55),
            white: Rgb::WHITE,
        }
    }
}

// ============================================================================
// WidgetConfig
// ============================================================================

/// Default focus duration: 90 minutes.
pub const DEFAULT_DURATION_SECONDS: u32 = 90 * 60;

/// Default eye-care work interval: 20 minutes.
pub const DEFAULT_EYE_WORK_SECONDS: u32 = 20 * 60;

/// Default eye-care relax interval: 20 seconds.
pub const DEFAULT_EYE_RELAX_SECONDS: u32 = 20;

/// Configuration for the focus widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Duration restored on reset, in seconds
    pub default_duration_seconds: u32,
    /// Eye-care work interval in seconds
    pub eye_work_seconds: u32,
    /// Eye-care relax interval in seconds
    pub eye_relax_seconds: u32,
    /// Period of the countdown and eye-care ticks
    pub tick_period: Duration,
    /// Period of the alarmed text blink
    pub blink_period: Duration,
    /// Period of the overlay border cycle
    pub alert_cycle_period: Duration,
    /// Frequency of the synthesized alert tone
    pub tone_frequency_hz: u32,
    /// Length of the synthesized alert tone
    pub tone_duration: Duration,
    /// Whether alert tones are played
    pub sound_enabled: bool,
    /// Whether the eye-care reminder runs
    pub eye_care_enabled: bool,
    /// Text shown in the empty task field
    pub task_placeholder: String,
    /// Task width limit used before the field has been laid out
    pub fallback_task_width: usize,
    /// Widget colors
    pub palette: Palette,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_duration_seconds: DEFAULT_DURATION_SECONDS,
            eye_work_seconds: DEFAULT_EYE_WORK_SECONDS,
            eye_relax_seconds: DEFAULT_EYE_RELAX_SECONDS,
            tick_period: Duration::from_secs(1),
            blink_period: Duration::from_millis(600),
            alert_cycle_period: Duration::from_millis(600),
            tone_frequency_hz: 1000,
            tone_duration: Duration::from_millis(200),
            sound_enabled: true,
            eye_care_enabled: true,
            task_placeholder: "Focus...".to_string(),
            fallback_task_width: 28,
            palette: Palette::default(),
        }
    }
}

impl WidgetConfig {
    /// Sets the duration restored on reset.
    pub fn with_default_duration(mut self, seconds: u32) -> Self {
        self.default_duration_seconds = seconds;
        self
    }

    /// Sets the eye-care work and relax intervals.
    pub fn with_eye_care(mut self, work_seconds: u32, relax_seconds: u32) -> Self {
        self.eye_work_seconds = work_seconds;
        self.eye_relax_seconds = relax_seconds;
        self
    }

    /// Enables or disables alert tones.
    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    /// Enables or disables the eye-care reminder.
    pub fn with_eye_care_enabled(mut self, enabled: bool) -> Self {
        self.eye_care_enabled = enabled;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.eye_work_seconds == 0 || self.eye_relax_seconds == 0 {
            return Err("目の休憩間隔は1秒以上で指定してください".to_string());
        }
        if self.tick_period.is_zero()
            || self.blink_period.is_zero()
            || self.alert_cycle_period.is_zero()
        {
            return Err("タイマー周期は0より大きい値で指定してください".to_string());
        }
        if self.tone_frequency_hz == 0 || self.tone_duration.is_zero() {
            return Err("アラート音の設定が不正です".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
