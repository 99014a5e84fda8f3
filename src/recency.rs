//! Relative "time ago" labels for commit timestamps

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

const DAYS_PER_WEEK: i64 = 7;
/// Months are a flat 30 days; calendar month lengths are ignored.
const DAYS_PER_MONTH: i64 = 30;

/// Describe how long before `now` the `timestamp` was, e.g. `3 days ago`
///
/// Timestamps in the future (clock skew) read as `0 minutes ago`. Units are
/// always plural.
#[must_use]
pub fn format_relative(now: DateTime<Utc>, timestamp: DateTime<FixedOffset>) -> String {
    let elapsed = now
        .signed_duration_since(timestamp.with_timezone(&Utc))
        .max(TimeDelta::zero());

    let days = elapsed.num_days();
    if days == 0 {
        let hours = elapsed.num_hours();
        if hours == 0 {
            return format!("{} minutes ago", elapsed.num_minutes());
        }
        return format!("{hours} hours ago");
    }

    if days < DAYS_PER_WEEK {
        format!("{days} days ago")
    } else if days < DAYS_PER_MONTH {
        format!("{} weeks ago", days / DAYS_PER_WEEK)
    } else {
        format!("{} months ago", days / DAYS_PER_MONTH)
    }
}
