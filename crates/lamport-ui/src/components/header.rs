use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the dashboard title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Process count and timezone in `[ N processes | timezone ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Number of processes shown on the dashboard.
    pub processes: u32,
    /// Human-readable timezone string (e.g. "UTC", "America/New_York").
    pub timezone: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(processes: u32, timezone: &'a str, theme: &'a Theme) -> Self {
        Self {
            processes,
            timezone,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" LAMPORT PROCESS VISUALIZATION ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Process count / timezone info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(format!("{} processes", self.processes), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.timezone.to_lowercase(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let header = Header::new(5, "UTC", &theme);
        assert_eq!(header.to_lines().len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let header = Header::new(5, "UTC", &theme);
        let lines = header.to_lines();

        let title_text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(
            title_text.contains("LAMPORT PROCESS VISUALIZATION"),
            "title line must carry the dashboard title, got: {title_text}"
        );
        assert!(title_text.contains(SPARKLES));
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let header = Header::new(3, "Europe/London", &theme);
        let lines = header.to_lines();

        let sep_text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(sep_text.chars().count(), 60, "separator must be 60 chars wide");
        assert!(sep_text.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_info_line_content() {
        let theme = Theme::dark();
        let header = Header::new(7, "America/New_York", &theme);
        let lines = header.to_lines();

        let info_text: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(info_text.contains("7 processes"), "got: {info_text}");
        assert!(
            info_text.contains("america/new_york"),
            "timezone must appear lowercased, got: {info_text}"
        );
        assert!(
            info_text.contains("[ ") && info_text.contains(" | ") && info_text.contains(" ]"),
            "format must be '[ N processes | timezone ]', got: {info_text}"
        );
    }

    #[test]
    fn test_header_empty_fourth_line() {
        let theme = Theme::dark();
        let header = Header::new(5, "UTC", &theme);
        let lines = header.to_lines();

        let empty_text: String = lines[3].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(empty_text.is_empty());
    }
}
