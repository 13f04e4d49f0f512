use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly. Falls back to `"UTC"` if
/// detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve a timezone setting string into a [`Tz`].
///
/// `"auto"` resolves to the detected system timezone. Unrecognised names
/// fall back to UTC with a warning rather than failing startup.
pub fn resolve_timezone(name: &str) -> Tz {
    let effective = if name == "auto" {
        get_system_timezone()
    } else {
        name.to_string()
    };

    effective.parse::<Tz>().unwrap_or_else(|_| {
        warn!("unrecognised timezone \"{effective}\", falling back to UTC");
        Tz::UTC
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
