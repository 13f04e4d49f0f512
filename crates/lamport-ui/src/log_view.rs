//! Color-coded event log view.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per log
//! entry, newest pinned to the bottom. Each row's background is decided at
//! render time by [`classify`]; nothing is stored on the entry itself.

use chrono_tz::Tz;
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use lamport_core::classify::classify;
use lamport_core::formatting::{clip_to_width, format_clock_millis};
use lamport_core::models::LogEntry;

use crate::themes::Theme;

/// Width of the wall-clock time column (`HH:MM:SS.mmm`).
const TIME_COLUMN: u16 = 12;

/// Columns reserved for the time column plus borders/spacing; the rest goes
/// to the message column.
const FIXED_COLUMNS: u16 = 17;

/// Render the event log into `area`, showing the tail that fits.
pub fn render_log_view(
    frame: &mut Frame,
    area: Rect,
    entries: &[LogEntry],
    tz: &Tz,
    theme: &Theme,
) {
    let header_cells = ["Time", "Message"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    // Two border rows and one header row never hold data.
    let visible = area.height.saturating_sub(3) as usize;
    let start = entries.len().saturating_sub(visible);
    let message_width = area.width.saturating_sub(FIXED_COLUMNS) as usize;

    let rows: Vec<Row> = entries[start..]
        .iter()
        .map(|entry| {
            let style = theme.classification_style(classify(&entry.message));
            Row::new(vec![
                Cell::from(format_clock_millis(entry.timestamp_ms, tz)),
                Cell::from(clip_to_width(&entry.message, message_width)),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Length(TIME_COLUMN), Constraint::Min(16)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Event Log ")
                .border_style(theme.table_border),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a placeholder when no protocol events have arrived yet.
pub fn render_empty_log(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No protocol events yet", theme.dim)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Event Log ")
                .border_style(theme.table_border),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_entries() -> Vec<LogEntry> {
        [
            "Process 1 requested the critical section",
            "Process 1 entered critical section",
            "Process 2 failed",
            "Process 1 exited critical section",
            "Process 2 recovered",
            "heartbeat",
        ]
        .iter()
        .enumerate()
        .map(|(i, msg)| LogEntry {
            timestamp_ms: 1_000 * i as i64,
            message: (*msg).to_string(),
        })
        .collect()
    }

    #[test]
    fn test_render_log_view_does_not_panic() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let entries = make_entries();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_log_view(frame, area, &entries, &Tz::UTC, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_log_view_more_entries_than_fit() {
        // 100 entries in a 6-row area: only the tail is sliced and rendering
        // must not panic or index out of bounds.
        let backend = TestBackend::new(100, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let entries: Vec<LogEntry> = (0..100)
            .map(|i| LogEntry {
                timestamp_ms: i,
                message: format!("Process 1 heartbeat {i}"),
            })
            .collect();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_log_view(frame, area, &entries, &Tz::UTC, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_log_view_empty_entries_does_not_panic() {
        let backend = TestBackend::new(100, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_log_view(frame, area, &[], &Tz::UTC, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_empty_log_does_not_panic() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_empty_log(frame, area, &theme);
            })
            .unwrap();
    }
}
