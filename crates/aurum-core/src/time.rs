use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc,
};

use aurum_domain::{common::shift_month, Frequency};

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Proleptic Gregorian calendar evaluated in one fixed UTC offset.
///
/// Every day and month bucket in the engine is resolved through this type, so
/// results never depend on the host's locale or time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Builds a calendar `minutes` east of UTC. Returns `None` outside ±24h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Wall-clock reading of `instant` in this calendar's zone, saturating at the
    /// ends of the representable range.
    pub fn local_datetime(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        let shift = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        instant
            .naive_utc()
            .checked_add_signed(shift)
            .unwrap_or(if shift > Duration::zero() {
                NaiveDateTime::MAX
            } else {
                NaiveDateTime::MIN
            })
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local_datetime(instant).date()
    }

    /// Converts a wall-clock reading in this calendar's zone back to an instant,
    /// saturating at the ends of the representable range.
    pub fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        let shift = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        match local.checked_sub_signed(shift) {
            Some(utc) => DateTime::from_naive_utc_and_offset(utc, Utc),
            None if shift > Duration::zero() => DateTime::<Utc>::MIN_UTC,
            None => DateTime::<Utc>::MAX_UTC,
        }
    }

    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.from_local(date.and_time(NaiveTime::MIN))
    }

    /// Next scheduled instant after `from`, keeping the local time of day.
    ///
    /// Never earlier than `from`; at the end of the calendar `from` itself is returned.
    pub fn next_occurrence(&self, frequency: Frequency, from: DateTime<Utc>) -> DateTime<Utc> {
        let local = self.local_datetime(from);
        let next = frequency.next_date(local.date());
        self.from_local(next.and_time(local.time())).max(from)
    }

    /// Moves `instant` by whole calendar months, clamping the day of month.
    pub fn add_months(&self, instant: DateTime<Utc>, months: i32) -> DateTime<Utc> {
        let local = self.local_datetime(instant);
        let shifted = shift_month(local.date(), months);
        self.from_local(shifted.and_time(local.time()))
    }

    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local_date(a) == self.local_date(b)
    }

    pub fn month_key(&self, instant: DateTime<Utc>) -> (i32, u32) {
        let date = self.local_date(instant);
        (date.year(), date.month())
    }

    pub fn same_month(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.month_key(a) == self.month_key(b)
    }

    pub fn same_year(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local_date(a).year() == self.local_date(b).year()
    }

    pub fn same_iso_week(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local_date(a).iso_week() == self.local_date(b).iso_week()
    }
}
