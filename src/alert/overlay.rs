//! Full-screen overlay hosts.
//!
//! The presenter talks to the screen through [`OverlayHost`]. The terminal
//! runtime uses [`ScreenOverlay`], whose state the renderer reads to draw a
//! border around the whole screen. [`MockOverlayHost`] records calls for tests.

use super::error::AlertError;
use crate::types::Rgb;

/// Identifier of a created overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Something that can show a full-screen border overlay.
pub trait OverlayHost {
    /// Creates a full-screen overlay with a border in `border_color`.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::OverlayCreation` if the overlay cannot be shown.
    fn create(&mut self, border_color: Rgb) -> Result<OverlayId, AlertError>;

    /// Shows or hides the overlay border.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::OverlayGone` if the overlay no longer exists.
    fn set_border_visible(&mut self, id: OverlayId, visible: bool) -> Result<(), AlertError>;

    /// Removes the overlay.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::OverlayGone` if the overlay no longer exists.
    fn destroy(&mut self, id: OverlayId) -> Result<(), AlertError>;
}

// ============================================================================
// ScreenOverlay
// ============================================================================

/// Border drawn around the whole terminal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBorder {
    pub id: OverlayId,
    pub color: Rgb,
    pub visible: bool,
}

/// Overlay host backed by the terminal screen.
#[derive(Debug, Default)]
pub struct ScreenOverlay {
    screen: (u16, u16),
    border: Option<ScreenBorder>,
    next_id: u64,
}

impl ScreenOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current screen size (columns, rows).
    pub fn set_screen_size(&mut self, columns: u16, rows: u16) {
        self.screen = (columns, rows);
    }

    /// Returns the active border, if any.
    pub fn border(&self) -> Option<&ScreenBorder> {
        self.border.as_ref()
    }

    fn active_mut(&mut self, id: OverlayId) -> Result<&mut ScreenBorder, AlertError> {
        self.border
            .as_mut()
            .filter(|border| border.id == id)
            .ok_or(AlertError::OverlayGone(id.0))
    }
}

impl OverlayHost for ScreenOverlay {
    fn create(&mut self, border_color: Rgb) -> Result<OverlayId, AlertError> {
        let (columns, rows) = self.screen;
        if columns < 2 || rows < 2 {
            return Err(AlertError::OverlayCreation(format!(
                "screen {}x{} is too small for a border",
                columns, rows
            )));
        }

        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.border = Some(ScreenBorder {
            id,
            color: border_color,
            visible: false,
        });
        Ok(id)
    }

    fn set_border_visible(&mut self, id: OverlayId, visible: bool) -> Result<(), AlertError> {
        self.active_mut(id)?.visible = visible;
        Ok(())
    }

    fn destroy(&mut self, id: OverlayId) -> Result<(), AlertError> {
        self.active_mut(id)?;
        self.border = None;
        Ok(())
    }
}

// ============================================================================
// MockOverlayHost
// ============================================================================

/// Overlay host that records every call.
#[derive(Debug, Default)]
pub struct MockOverlayHost {
    active: Vec<(OverlayId, bool)>,
    created: usize,
    destroyed: usize,
    should_fail: bool,
}

impl MockOverlayHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&mut self, should_fail: bool) {
        self.should_fail = should_fail;
    }

    /// Number of overlays currently shown.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created
    }

    #[must_use]
    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }

    /// Border visibility of the most recent active overlay.
    #[must_use]
    pub fn border_visible(&self) -> Option<bool> {
        self.active.last().map(|(_, visible)| *visible)
    }
}

impl OverlayHost for MockOverlayHost {
    fn create(&mut self, _border_color: Rgb) -> Result<OverlayId, AlertError> {
        if self.should_fail {
            return Err(AlertError::OverlayCreation("Mock failure".to_string()));
        }
        self.created += 1;
        let id = OverlayId(self.created as u64);
        self.active.push((id, false));
        Ok(id)
    }

    fn set_border_visible(&mut self, id: OverlayId, visible: bool) -> Result<(), AlertError> {
        let entry = self
            .active
            .iter_mut()
            .find(|(active, _)| *active == id)
            .ok_or(AlertError::OverlayGone(id.0))?;
        entry.1 = visible;
        Ok(())
    }

    fn destroy(&mut self, id: OverlayId) -> Result<(), AlertError> {
        let before = self.active.len();
        self.active.retain(|(active, _)| *active != id);
        if self.active.len() == before {
            return Err(AlertError::OverlayGone(id.0));
        }
        self.destroyed += 1;
        Ok(())
    }
}
