//! Terminal runtime.
//!
//! Runs the widget on a current-thread tokio runtime. The loop waits for
//! whichever comes first: the next scheduled deadline or a terminal event.
//! Virtual scheduler time is the real time elapsed since the loop started.

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::render::{self, WidgetLayout};
use super::{keys, FocusWidget, SessionSummary};
use crate::alert::ScreenOverlay;
use crate::sound::SoundPlayer;
use crate::timer::TimerEvent;
use crate::types::WidgetConfig;

// ============================================================================
// TerminalSession
// ============================================================================

/// Raw-mode alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("端末をrawモードにできません")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("代替画面に切り替えできません")?;

        // Lets Ctrl+Enter arrive as Enter with the CONTROL modifier
        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
            .context("キーボード拡張を有効にできません")?;
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("端末を初期化できません")?;
        Ok(Self {
            terminal,
            keyboard_enhanced,
        })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let backend = self.terminal.backend_mut();
        if self.keyboard_enhanced {
            let _ = execute!(backend, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(backend, LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = self.terminal.show_cursor();
    }
}

// ============================================================================
// Event loop
// ============================================================================

/// Runs one widget until it is closed and returns its final state.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or read from.
/// The terminal is restored in every case.
pub async fn run(config: WidgetConfig, player: Arc<dyn SoundPlayer>) -> Result<SessionSummary> {
    let mut session = TerminalSession::enter()?;
    let size = session.terminal.size().context("端末サイズを取得できません")?;

    let mut overlay = ScreenOverlay::new();
    overlay.set_screen_size(size.width, size.height);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut widget = FocusWidget::new(config, overlay, player, Some(event_tx));
    info!("ウィジェットを起動しました");

    let origin = Instant::now();
    let mut events = EventStream::new();
    let mut layout = WidgetLayout::default();

    let result = loop {
        widget.run_due(origin.elapsed());
        while let Ok(event) = event_rx.try_recv() {
            log_timer_event(&event);
        }
        if widget.is_closed() {
            break Ok(());
        }

        if let Err(e) = session.terminal.draw(|frame| {
            layout = render::layout(frame.area());
            widget
                .controller_mut()
                .task_mut()
                .set_field_width(usize::from(layout.task.width));
            render::draw(frame, &widget, &layout);
        }) {
            break Err(e).context("描画に失敗しました");
        }

        let deadline = widget.next_deadline().map(|at| origin + at);
        tokio::select! {
            _ = wait_until(deadline) => {}
            event = events.next() => match event {
                Some(Ok(event)) => {
                    // Fire anything that came due before acting on the input
                    widget.run_due(origin.elapsed());
                    handle_terminal_event(&mut widget, event, &layout);
                }
                Some(Err(e)) => break Err(e).context("端末イベントを読み取れません"),
                None => {
                    warn!("端末イベントストリームが終了しました");
                    break Ok(());
                }
            },
        }
    };

    widget.shutdown();
    drop(session);
    info!(uptime_secs = origin.elapsed().as_secs(), "ウィジェットを終了しました");
    result.map(|()| widget.summary())
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn handle_terminal_event(widget: &mut FocusWidget<ScreenOverlay>, event: Event, layout: &WidgetLayout) {
    let action = match event {
        Event::Key(key) => keys::map_key(key, widget.focus()),
        Event::Mouse(mouse) => keys::map_mouse(mouse, layout),
        Event::Resize(columns, rows) => {
            debug!(columns, rows, "Terminal resized");
            widget.overlay_host_mut().set_screen_size(columns, rows);
            None
        }
        _ => None,
    };

    if let Some(action) = action {
        if !widget.handle(action) {
            debug!(action = %action, state = %widget.controller().state(), "Action ignored");
        }
    }
}

fn log_timer_event(event: &TimerEvent) {
    match event {
        TimerEvent::Tick { remaining_seconds } => debug!(remaining_seconds, "Tick"),
        TimerEvent::InputRejected { input } => warn!(input = %input, "入力を破棄しました"),
        other => debug!(event = ?other, "Timer event"),
    }
}
