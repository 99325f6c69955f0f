pub mod clock;
pub mod directory;
pub mod error;
pub mod recurrence;
pub mod registry;
pub mod scheduler;
pub mod testing;
pub mod validate;

use chrono::NaiveDate;
use clock::{Clock, FixedClock, SystemClock};
use directory::InMemoryDirectory;
use scheduler::TransferScheduler;

/// Returns a scheduler wired with the default clock that will be used most
/// of the time.
///
/// This function pins the clock to the provided date as "today", or uses the
/// system clock if none is provided. Tests pass a date so due-ness checks
/// and creation timestamps stay deterministic.
pub fn default_scheduler(directory: InMemoryDirectory, today: Option<NaiveDate>) -> TransferScheduler {
    let clock: Box<dyn Clock + Send + Sync> = match today {
        Some(date) => Box::new(FixedClock::for_date(date)),
        None => Box::new(SystemClock),
    };

    TransferScheduler::new(Box::new(directory), clock)
}
