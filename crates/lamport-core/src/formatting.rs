use chrono::DateTime;
use chrono_tz::Tz;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a wall-clock timestamp (milliseconds since the epoch) as
/// `HH:MM:SS.mmm` in the given display timezone.
///
/// Out-of-range values fall back to the raw number so a corrupt stamp is
/// still visible instead of panicking the render loop.
///
/// # Examples
///
/// ```
/// use lamport_core::formatting::format_clock_millis;
///
/// assert_eq!(format_clock_millis(0, &chrono_tz::Tz::UTC), "00:00:00.000");
/// assert_eq!(format_clock_millis(86_399_999, &chrono_tz::Tz::UTC), "23:59:59.999");
/// ```
pub fn format_clock_millis(timestamp_ms: i64, tz: &Tz) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.with_timezone(tz).format("%H:%M:%S%.3f").to_string(),
        None => timestamp_ms.to_string(),
    }
}

/// Clip `text` to at most `max_width` terminal columns, appending an
/// ellipsis when anything was cut.
///
/// Width is measured in display columns (wide characters count as two), so
/// clipped cells stay aligned in the table regardless of content.
///
/// # Examples
///
/// ```
/// use lamport_core::formatting::clip_to_width;
///
/// assert_eq!(clip_to_width("abcdef", 10), "abcdef");
/// assert_eq!(clip_to_width("abcdef", 4), "abc…");
/// assert_eq!(clip_to_width("abcdef", 0), "");
/// ```
pub fn clip_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    // Reserve one column for the ellipsis.
    let budget = max_width - 1;
    let mut clipped = String::new();
    let mut used = 0;

    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        clipped.push(ch);
        used += w;
    }

    clipped.push('…');
    clipped
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    // ── format_clock_millis ───────────────────────────────────────────────

    #[test]
    fn test_format_clock_millis_epoch_utc() {
        assert_eq!(format_clock_millis(0, &Tz::UTC), "00:00:00.000");
    }

    #[test]
    fn test_format_clock_millis_subsecond_precision() {
        // 12:34:56.789 UTC on 1970-01-01.
        let ms = ((12 * 3600 + 34 * 60 + 56) * 1000 + 789) as i64;
        assert_eq!(format_clock_millis(ms, &Tz::UTC), "12:34:56.789");
    }

    #[test]
    fn test_format_clock_millis_timezone_offset() {
        // Midnight UTC is 09:00 in Tokyo (no DST).
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        assert_eq!(format_clock_millis(0, &tz), "09:00:00.000");
    }

    #[test]
    fn test_format_clock_millis_out_of_range_falls_back() {
        assert_eq!(format_clock_millis(i64::MAX, &Tz::UTC), i64::MAX.to_string());
    }

    // ── clip_to_width ─────────────────────────────────────────────────────

    #[test]
    fn test_clip_to_width_no_clip_needed() {
        assert_eq!(clip_to_width("short", 20), "short");
        assert_eq!(clip_to_width("exact", 5), "exact");
    }

    #[test]
    fn test_clip_to_width_appends_ellipsis() {
        assert_eq!(clip_to_width("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_clip_to_width_zero_budget() {
        assert_eq!(clip_to_width("anything", 0), "");
    }

    #[test]
    fn test_clip_to_width_wide_characters() {
        // Each CJK character occupies two columns, so only one fits in a
        // four-column budget once the ellipsis is reserved.
        assert_eq!(clip_to_width("日本語", 4), "日…");
        assert_eq!(clip_to_width("日本語", 6), "日本語");
    }

    #[test]
    fn test_clip_to_width_empty_input() {
        assert_eq!(clip_to_width("", 4), "");
    }
}
