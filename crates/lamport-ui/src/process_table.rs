//! Per-process state table for the dashboard.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per process:
//! id, lifecycle status, latest logical timestamp, and the formatted
//! pending-request queue.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use lamport_core::formatting::clip_to_width;
use lamport_core::models::ProcessView;

use crate::themes::Theme;

/// Columns reserved for the three fixed-width cells plus borders/spacing;
/// whatever remains goes to the queue column.
const FIXED_COLUMNS: u16 = 44;

/// Render the process table into `area`.
pub fn render_process_table(frame: &mut Frame, area: Rect, views: &[ProcessView], theme: &Theme) {
    let header_cells = ["Process", "Status", "Timestamp", "Queue"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let queue_width = area.width.saturating_sub(FIXED_COLUMNS) as usize;

    let rows: Vec<Row> = views
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let base = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(format!("Process {}", view.id)),
                Cell::from(view.status.clone()).style(theme.status_style(&view.status)),
                Cell::from(view.last_timestamp.to_string()),
                Cell::from(clip_to_width(&view.queue_snapshot, queue_width)),
            ])
            .style(base)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Processes ")
                .border_style(theme.table_border),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
