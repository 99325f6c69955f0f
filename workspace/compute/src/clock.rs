use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Time source for the scheduler.
///
/// Injected rather than read from the system directly so due-ness checks and
/// creation timestamps stay deterministic under test. Scheduling decisions
/// only ever use the calendar date; the full instant exists for record
/// timestamps.
pub trait Clock: std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date in the reference zone.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Pins the clock to midnight UTC on the given date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
