//! Key and mouse mapping.
//!
//! | Key | Action |
//! |---|---|
//! | Enter | toggle |
//! | Space | toggle, or typed when a field has focus |
//! | Ctrl+Enter / Ctrl+J | complete early |
//! | Ctrl+R | reset |
//! | Ctrl+U | clear the focused field |
//! | Tab | next field |
//! | Esc | blur |
//! | Ctrl+Q / Ctrl+C | close |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use super::render::WidgetLayout;
use super::{Focus, WidgetAction};
use crate::timer::FieldEdit;

/// Maps a key press to a widget action.
///
/// Returns `None` for keys without a binding and for key releases.
pub fn map_key(key: KeyEvent, focus: Focus) -> Option<WidgetAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        // Terminals without key disambiguation send Ctrl+Enter as Ctrl+J
        KeyCode::Enter | KeyCode::Char('j') if ctrl => WidgetAction::CompleteEarly,
        KeyCode::Char('r') if ctrl => WidgetAction::Reset,
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => WidgetAction::Close,
        KeyCode::Char('u') if ctrl && focus.is_field() => WidgetAction::Edit(FieldEdit::Clear),
        KeyCode::Enter => WidgetAction::Toggle,
        KeyCode::Tab => WidgetAction::FocusNext,
        KeyCode::Esc => WidgetAction::Blur,
        KeyCode::Backspace if focus.is_field() => WidgetAction::Edit(FieldEdit::Backspace),
        KeyCode::Char(' ') if !focus.is_field() => WidgetAction::Toggle,
        KeyCode::Char(c) if focus.is_field() && !ctrl => WidgetAction::Edit(FieldEdit::Insert(c)),
        _ => return None,
    };
    Some(action)
}

/// Maps a mouse event to a widget action.
///
/// Only left-button presses are mapped. A click outside every field and
/// button blurs the fields.
pub fn map_mouse(mouse: MouseEvent, layout: &WidgetLayout) -> Option<WidgetAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(map_click(mouse.column, mouse.row, layout)),
        _ => None,
    }
}

/// Maps a click at (`column`, `row`) to a widget action.
pub fn map_click(column: u16, row: u16, layout: &WidgetLayout) -> WidgetAction {
    let position = Position::new(column, row);
    let targets = [
        (layout.start, WidgetAction::Toggle),
        (layout.complete, WidgetAction::CompleteEarly),
        (layout.reset, WidgetAction::Reset),
        (layout.close, WidgetAction::Close),
        (layout.task, WidgetAction::FocusField(Focus::Task)),
        (layout.duration, WidgetAction::FocusField(Focus::Duration)),
    ];

    targets
        .into_iter()
        .find(|(area, _)| area.contains(position))
        .map_or(WidgetAction::Blur, |(_, action)| action)
}
