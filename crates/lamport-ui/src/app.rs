//! Main application state and TUI event loop for lamport-watch.
//!
//! [`App`] is the presenter: the only component that reads or writes the
//! rendering surface. It owns a view model (process views plus log rows)
//! that is mutated exclusively on the render loop by applying
//! [`RenderRequest`] values drained from the store's channel, so producer
//! threads never touch a visual element directly.

use std::io;
use std::time::Duration;

use chrono_tz::Tz;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use lamport_core::error::Result;
use lamport_core::models::{LogEntry, ProcessView};
use lamport_runtime::store::RenderRequest;

use crate::components::Header;
use crate::log_view;
use crate::process_table;
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Timezone used to display log timestamps.
    pub timezone: Tz,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Presenter-owned process views, index `id - 1`.
    views: Vec<ProcessView>,
    /// Presenter-owned log rows in arrival order.
    log: Vec<LogEntry>,
}

impl App {
    /// Construct the presenter with `total` fresh process views.
    ///
    /// The initial view model matches a freshly constructed store (status
    /// `"Active"`, timestamp 0, empty queue), so replaying the request
    /// stream keeps the two in lockstep.
    pub fn new(theme_name: &str, total: u32, timezone: Tz) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            timezone,
            should_quit: false,
            views: (1..=total).map(ProcessView::new).collect(),
            log: Vec::new(),
        }
    }

    /// Current process views, in id order.
    pub fn process_views(&self) -> &[ProcessView] {
        &self.views
    }

    /// Current log rows, in arrival order.
    pub fn log_rows(&self) -> &[LogEntry] {
        &self.log
    }

    // ── Render-request application ────────────────────────────────────────

    /// Apply one marshaled instruction to the view model.
    ///
    /// Each request mutates exactly one element (or resets everything), so
    /// consecutive requests for the same element coalesce to the latest
    /// value before the next draw. Requests for ids this presenter does not
    /// know are dropped; the store performs the same check upstream.
    pub fn apply(&mut self, request: RenderRequest) {
        match request {
            RenderRequest::Status { id, status } => {
                if let Some(view) = self.view_mut(id) {
                    view.status = status;
                }
            }
            RenderRequest::Timestamp { id, value } => {
                if let Some(view) = self.view_mut(id) {
                    view.last_timestamp = value;
                }
            }
            RenderRequest::Queue { id, snapshot } => {
                if let Some(view) = self.view_mut(id) {
                    view.queue_snapshot = snapshot;
                }
            }
            RenderRequest::LogRow(entry) => self.log.push(entry),
            RenderRequest::Reset { total } => {
                self.views = (1..=total).map(ProcessView::new).collect();
                self.log.clear();
            }
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Run the dashboard event loop, receiving render requests from `rx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// the terminal event loop stays on the current thread while requests
    /// arrive on the channel via `try_recv`.
    ///
    /// The loop exits on `q`, `Q`, or Ctrl+C. Terminal state is restored
    /// unconditionally before returning.
    pub async fn run(mut self, mut rx: mpsc::UnboundedReceiver<RenderRequest>) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        _ => {}
                    }
                }
            }

            // Drain any pending render requests (non-blocking). A
            // disconnected channel means the producers are gone; the view
            // stays up until the user quits.
            while let Ok(request) = rx.try_recv() {
                self.apply(request);
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn view_mut(&mut self, id: u32) -> Option<&mut ProcessView> {
        if id == 0 {
            return None;
        }
        self.views.get_mut(id as usize - 1)
    }

    /// Render the current view model into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Header, process table sized to the process count, log gets the rest.
        let table_height = self.views.len() as u16 + 3;
        let chunks = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(table_height),
            Constraint::Min(5),
        ])
        .split(area);

        let header = Header::new(self.views.len() as u32, self.timezone.name(), &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), chunks[0]);

        process_table::render_process_table(frame, chunks[1], &self.views, &self.theme);

        if self.log.is_empty() {
            log_view::render_empty_log(frame, chunks[2], &self.theme);
        } else {
            log_view::render_log_view(frame, chunks[2], &self.log, &self.timezone, &self.theme);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
