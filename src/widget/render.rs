//! Drawing the widget with ratatui.
//!
//! The widget is a single rounded bar at the top of the screen:
//!
//! ```text
//! ╭──────────────────────────────────────────────────────────────╮
//! │⠿ Focus...                    90:00  eye 20:00   ▶ ✓ ⟳ ✕     │
//! ╰──────────────────────────────────────────────────────────────╯
//! ```
//!
//! The expiry alert draws a thick border around the whole screen.

use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use super::{Focus, FocusWidget};
use crate::alert::ScreenOverlay;
use crate::timer::rendered_width;
use crate::types::Rgb;

const BAR_MAX_WIDTH: u16 = 76;
const BAR_HEIGHT: u16 = 3;

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Screen areas of the widget's parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetLayout {
    pub bar: Rect,
    pub grip: Rect,
    pub task: Rect,
    pub duration: Rect,
    pub eye: Rect,
    pub start: Rect,
    pub complete: Rect,
    pub reset: Rect,
    pub close: Rect,
}

/// Lays out the widget in `area`, leaving a one-cell margin for the alert
/// border.
pub fn layout(area: Rect) -> WidgetLayout {
    let inner = area.inner(Margin::new(1, 1));
    let bar = Rect {
        width: inner.width.min(BAR_MAX_WIDTH),
        height: inner.height.min(BAR_HEIGHT),
        ..inner
    };
    let content = bar.inner(Margin::new(1, 1));

    let [grip, task, _, duration, _, eye, _, start, complete, reset, close] = Layout::horizontal([
        Constraint::Length(2),
        Constraint::Min(8),
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Length(1),
        Constraint::Length(11),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(2),
    ])
    .areas(content);

    WidgetLayout {
        bar,
        grip,
        task,
        duration,
        eye,
        start,
        complete,
        reset,
        close,
    }
}

/// Draws the widget and, while visible, the alert border.
pub fn draw(frame: &mut Frame, widget: &FocusWidget<ScreenOverlay>, layout: &WidgetLayout) {
    let controller = widget.controller();
    let palette = controller.config().palette;
    let fg = |rgb: Rgb| Style::new().fg(rgb.into());

    if let Some(border) = widget.overlay_host().border().filter(|border| border.visible) {
        let flash = Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(fg(border.color));
        frame.render_widget(flash, frame.area());
    }

    let bar = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(fg(palette.border))
        .style(Style::new().bg(palette.bg_main.into()));
    frame.render_widget(bar, layout.bar);
    frame.render_widget(Span::styled("⠿", fg(palette.grip)), layout.grip);

    let focus = widget.focus();
    let task = controller.task();
    let task_focused = focus == Focus::Task;
    frame.render_widget(
        Paragraph::new(task.display(task_focused)).style(fg(controller.task_color(task_focused))),
        layout.task,
    );

    let mut time_style = fg(controller.time_color()).add_modifier(Modifier::BOLD);
    if focus == Focus::Duration {
        time_style = time_style.add_modifier(Modifier::UNDERLINED);
    }
    frame.render_widget(
        Paragraph::new(controller.duration_input()).style(time_style),
        layout.duration,
    );

    if let Some(engine) = widget.eye_care() {
        frame.render_widget(
            Paragraph::new(engine.label()).style(fg(engine.color(&palette))),
            layout.eye,
        );
    }

    let buttons = [
        (controller.start_glyph().as_str(), palette.text_main, layout.start),
        ("✓", palette.success, layout.complete),
        ("⟳", palette.text_meta, layout.reset),
        ("✕", palette.text_meta, layout.close),
    ];
    for (glyph, color, area) in buttons {
        frame.render_widget(Span::styled(glyph, fg(color)), area);
    }

    let cursor = match focus {
        Focus::Task => Some((layout.task, task.text())),
        Focus::Duration => Some((layout.duration, controller.duration_input())),
        Focus::None => None,
    };
    if let Some((area, text)) = cursor.filter(|(area, _)| !area.is_empty()) {
        let offset = u16::try_from(rendered_width(text)).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(offset.min(area.width - 1));
        frame.set_cursor_position(Position::new(x, area.y));
    }
}
