//! Editable text fields of the widget.

use ratatui::text::Line;

/// An edit applied to a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    /// Append a character
    Insert(char),
    /// Remove the last character
    Backspace,
    /// Remove everything
    Clear,
}

impl FieldEdit {
    /// Applies the edit to `text` without any validation.
    pub fn apply_to(self, text: &mut String) {
        match self {
            FieldEdit::Insert(c) => text.push(c),
            FieldEdit::Backspace => {
                text.pop();
            }
            FieldEdit::Clear => text.clear(),
        }
    }
}

/// Returns the number of terminal columns `text` occupies.
pub fn rendered_width(text: &str) -> usize {
    Line::raw(text).width()
}

/// Free-text label of the current focus run.
///
/// Input that would not fit the field is rejected, measured in rendered
/// terminal columns rather than characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLabel {
    text: String,
    placeholder: String,
    fallback_width: usize,
    field_width: Option<usize>,
}

impl TaskLabel {
    /// Margin kept free at the end of the field for the cursor.
    const CURSOR_MARGIN: usize = 1;

    pub fn new(placeholder: impl Into<String>, fallback_width: usize) -> Self {
        Self {
            text: String::new(),
            placeholder: placeholder.into(),
            fallback_width,
            field_width: None,
        }
    }

    /// Returns the entered text (empty if none).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the entered text, or `None` when empty.
    pub fn value(&self) -> Option<&str> {
        (!self.text.is_empty()).then_some(self.text.as_str())
    }

    /// Returns true if no text was entered.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the text to draw: the placeholder when empty and unfocused.
    pub fn display(&self, focused: bool) -> &str {
        if self.text.is_empty() && !focused {
            &self.placeholder
        } else {
            &self.text
        }
    }

    /// Returns true if the placeholder is what [`TaskLabel::display`] shows.
    pub fn shows_placeholder(&self, focused: bool) -> bool {
        self.text.is_empty() && !focused
    }

    /// Records the laid-out field width in columns.
    pub fn set_field_width(&mut self, columns: usize) {
        self.field_width = Some(columns);
    }

    /// Maximum rendered width, exclusive.
    pub fn limit(&self) -> usize {
        match self.field_width {
            Some(columns) if columns > Self::CURSOR_MARGIN => columns - Self::CURSOR_MARGIN,
            _ => self.fallback_width,
        }
    }

    /// Returns true if `proposed` fits the field.
    pub fn fits(&self, proposed: &str) -> bool {
        rendered_width(proposed) < self.limit()
    }

    /// Applies an edit. Returns false if it was rejected for overflowing.
    pub fn apply(&mut self, edit: FieldEdit) -> bool {
        if let FieldEdit::Insert(_) = edit {
            let mut proposed = self.text.clone();
            edit.apply_to(&mut proposed);
            if !self.fits(&proposed) {
                return false;
            }
            self.text = proposed;
            return true;
        }
        edit.apply_to(&mut self.text);
        true
    }

    /// Clears the text, showing the placeholder again.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}
