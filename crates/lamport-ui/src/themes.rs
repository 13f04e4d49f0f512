use ratatui::style::{Color, Modifier, Style};

use lamport_core::classify::Classification;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Orange is outside the 16-color ANSI palette; dark and light themes use a
/// truecolor value for the "exited" rows.
const ORANGE: Color = Color::Rgb(255, 165, 0);

/// Complete theme definition carrying all UI styles used by the dashboard
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Process table ────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    // ── Process status ───────────────────────────────────────────────────────
    pub status_active: Style,
    pub status_waiting: Style,
    pub status_critical: Style,
    pub status_failed: Style,
    pub status_recovered: Style,
    pub status_unknown: Style,

    // ── Log rows ─────────────────────────────────────────────────────────────
    /// Background for rows reporting a failure.
    pub log_failed: Style,
    /// Background for rows reporting a recovery.
    pub log_recovered: Style,
    /// Background for rows reporting critical-section entry.
    pub log_entered: Style,
    /// Background for rows reporting critical-section exit.
    pub log_exited: Style,
    /// Everything else.
    pub log_neutral: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            status_active: Style::default().fg(Color::Green),
            status_waiting: Style::default().fg(Color::Yellow),
            status_critical: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            status_failed: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            status_recovered: Style::default().fg(Color::Cyan),
            status_unknown: Style::default().fg(Color::White),

            log_failed: Style::default().bg(Color::Red).fg(Color::White),
            log_recovered: Style::default().bg(Color::Green).fg(Color::Black),
            log_entered: Style::default().bg(Color::Yellow).fg(Color::Black),
            log_exited: Style::default().bg(ORANGE).fg(Color::Black),
            log_neutral: Style::default().fg(Color::White),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so that content remains legible against a
    /// white/light-grey terminal canvas; the log row backgrounds are the
    /// same protocol colours as the dark theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),

            status_active: Style::default().fg(Color::Green),
            status_waiting: Style::default().fg(Color::Yellow),
            status_critical: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            status_failed: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            status_recovered: Style::default().fg(Color::Blue),
            status_unknown: Style::default().fg(Color::Black),

            log_failed: Style::default().bg(Color::Red).fg(Color::White),
            log_recovered: Style::default().bg(Color::Green).fg(Color::Black),
            log_entered: Style::default().bg(Color::Yellow).fg(Color::Black),
            log_exited: Style::default().bg(ORANGE).fg(Color::Black),
            log_neutral: Style::default().fg(Color::Black),
        }
    }

    /// Classic terminal theme using only the basic ANSI palette.
    ///
    /// Avoids bold modifiers and truecolor to maximise compatibility with
    /// minimal terminal emulators; "exited" rows use magenta as the nearest
    /// stand-in for orange.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            status_active: Style::default().fg(Color::Green),
            status_waiting: Style::default().fg(Color::Yellow),
            status_critical: Style::default().fg(Color::Magenta),
            status_failed: Style::default().fg(Color::Red),
            status_recovered: Style::default().fg(Color::Cyan),
            status_unknown: Style::default().fg(Color::White),

            log_failed: Style::default().bg(Color::Red).fg(Color::White),
            log_recovered: Style::default().bg(Color::Green).fg(Color::Black),
            log_entered: Style::default().bg(Color::Yellow).fg(Color::Black),
            log_exited: Style::default().bg(Color::Magenta).fg(Color::Black),
            log_neutral: Style::default().fg(Color::White),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Return the row style for a log classification.
    pub fn classification_style(&self, classification: Classification) -> Style {
        match classification {
            Classification::Failed => self.log_failed,
            Classification::Recovered => self.log_recovered,
            Classification::Entered => self.log_entered,
            Classification::Exited => self.log_exited,
            Classification::Neutral => self.log_neutral,
        }
    }

    /// Return the status-cell style that best matches a free-form status
    /// label.  Statuses are driver-defined strings, so this is a keyword
    /// dispatch with a plain-text fallback, never an enum.
    pub fn status_style(&self, status: &str) -> Style {
        let lower = status.to_lowercase();
        if lower.contains("fail") {
            self.status_failed
        } else if lower.contains("recover") {
            self.status_recovered
        } else if lower.contains("wait") {
            self.status_waiting
        } else if lower.contains("cs") || lower.contains("critical") {
            self.status_critical
        } else if lower.contains("active") {
            self.status_active
        } else {
            self.status_unknown
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
