//! Main focus timer.
//!
//! This module provides:
//!
//! - Duration input parsing (`MM` or `MM:SS`)
//! - The countdown engine driven by scheduled ticks
//! - The task label with width-limited editing
//! - The controller state machine tying them to the expiry alert

mod controller;
mod countdown;
mod error;
mod field;
mod input;

pub use controller::{StartGlyph, TimerController, TimerEvent};
pub use countdown::{CountdownEngine, CountdownState, TickOutcome};
pub use error::InputError;
pub use field::{rendered_width, FieldEdit, TaskLabel};
pub use input::{format_clock, parse_duration};
