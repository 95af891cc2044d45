//! Focus Widget Library
//!
//! This library provides the core functionality of the focus widget.
//! It includes:
//! - A cooperative, cancelable scheduler on virtual time
//! - The countdown timer, its state machine and duration input parsing
//! - The eye-care reminder alternating work and relax phases
//! - The expiry alert with a flashing screen border and tone
//! - Non-blocking sound playback with a terminal bell fallback
//! - The terminal widget (key mapping, drawing, event loop)
//! - CLI command parsing and display utilities

pub mod alert;
pub mod cli;
pub mod eyecare;
pub mod scheduler;
pub mod sound;
pub mod timer;
pub mod types;
pub mod widget;

// Re-export commonly used types for convenience
pub use types::{EyeCarePhase, Palette, Rgb, TimerState, Wakeup, WidgetConfig};

// Re-export scheduler types
pub use scheduler::{CancelToken, Scheduler};

// Re-export timer types
pub use timer::{
    format_clock, parse_duration, CountdownEngine, FieldEdit, InputError, TaskLabel,
    TimerController, TimerEvent,
};

// Re-export alert types
pub use alert::{AlertError, AlertPresenter, MockOverlayHost, OverlayHost, ScreenOverlay};

// Re-export eye-care types
pub use eyecare::EyeCareEngine;

// Re-export sound types
pub use sound::{
    MockSoundPlayer, RodioSoundPlayer, SoundDispatcher, SoundError, SoundPlayer, SoundSource,
};

// Re-export widget types
pub use widget::{Focus, FocusWidget, SessionSummary, WidgetAction};
