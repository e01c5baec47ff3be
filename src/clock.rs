//! Wall clock shown in the corner of the scene.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Format `instant` in `tz` as a 12-hour time with the zone abbreviation,
/// e.g. `3:04:05 PM CST`.
pub fn format_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format("%-I:%M:%S %p %Z")
        .to_string()
}
