use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::Calendar;

/// Reporting window used to filter ledger entries relative to an injected `now`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "range", rename_all = "snake_case")]
pub enum DateRange {
    /// Same ISO week as `now`.
    ThisWeek,
    ThisMonth,
    LastMonth,
    Last3Months,
    Last6Months,
    ThisYear,
    /// Inclusive on both ends.
    Custom {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl DateRange {
    pub const PRESETS: [DateRange; 6] = [
        DateRange::ThisWeek,
        DateRange::ThisMonth,
        DateRange::LastMonth,
        DateRange::Last3Months,
        DateRange::Last6Months,
        DateRange::ThisYear,
    ];

    pub fn contains(&self, instant: DateTime<Utc>, now: DateTime<Utc>, calendar: &Calendar) -> bool {
        match *self {
            DateRange::ThisWeek => calendar.same_iso_week(instant, now),
            DateRange::ThisMonth => calendar.same_month(instant, now),
            DateRange::LastMonth => calendar.same_month(instant, calendar.add_months(now, -1)),
            DateRange::Last3Months => trailing(instant, now, 3, calendar),
            DateRange::Last6Months => trailing(instant, now, 6, calendar),
            DateRange::ThisYear => calendar.same_year(instant, now),
            DateRange::Custom { start, end } => instant >= start && instant <= end,
        }
    }
}

fn trailing(instant: DateTime<Utc>, now: DateTime<Utc>, months: i32, calendar: &Calendar) -> bool {
    instant >= calendar.add_months(now, -months) && instant <= now
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRange::ThisWeek => f.write_str("This Week"),
            DateRange::ThisMonth => f.write_str("This Month"),
            DateRange::LastMonth => f.write_str("Last Month"),
            DateRange::Last3Months => f.write_str("Last 3 Months"),
            DateRange::Last6Months => f.write_str("Last 6 Months"),
            DateRange::ThisYear => f.write_str("This Year"),
            DateRange::Custom { start, end } => write!(
                f,
                "{} - {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn iso_week_spans_year_boundary() {
        // 2024-12-30 (Mon) and 2025-01-02 (Thu) share ISO week 2025-W01.
        let calendar = Calendar::utc();
        assert!(DateRange::ThisWeek.contains(at(2024, 12, 30), at(2025, 1, 2), &calendar));
        assert!(!DateRange::ThisWeek.contains(at(2024, 12, 29), at(2025, 1, 2), &calendar));
    }

    #[test]
    fn last_month_wraps_year() {
        let calendar = Calendar::utc();
        let now = at(2025, 1, 10);
        assert!(DateRange::LastMonth.contains(at(2024, 12, 31), now, &calendar));
        assert!(!DateRange::LastMonth.contains(at(2025, 1, 1), now, &calendar));
    }

    #[test]
    fn trailing_windows_exclude_future_entries() {
        let calendar = Calendar::utc();
        let now = at(2025, 6, 15);
        assert!(DateRange::Last3Months.contains(at(2025, 3, 15), now, &calendar));
        assert!(!DateRange::Last3Months.contains(at(2025, 3, 14), now, &calendar));
        assert!(!DateRange::Last6Months.contains(at(2025, 6, 16), now, &calendar));
        assert!(DateRange::Last6Months.contains(at(2024, 12, 15), now, &calendar));
    }

    #[test]
    fn custom_range_is_inclusive() {
        let calendar = Calendar::utc();
        let range = DateRange::Custom {
            start: at(2025, 1, 1),
            end: at(2025, 1, 31),
        };
        assert!(range.contains(at(2025, 1, 1), at(2030, 1, 1), &calendar));
        assert!(range.contains(at(2025, 1, 31), at(2030, 1, 1), &calendar));
        assert!(!range.contains(at(2025, 2, 1), at(2030, 1, 1), &calendar));
    }
}
