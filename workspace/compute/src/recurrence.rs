use chrono::{Datelike, Duration, NaiveDate};
use model::entities::scheduled_transfer::RecurrencePeriod;

/// Returns the number of days in the given month using chrono.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    // Create a date for the first day of the next month
    let next_month_year = year + (month / 12) as i32;
    let next_month = (month % 12) + 1;

    // Get the first day of the next month, then go back one day to land on
    // the last day of the current month.
    let first_day_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1).unwrap();
    let last_day_current_month = first_day_next_month.pred_opt().unwrap();

    last_day_current_month.day()
}

/// Returns the occurrence date one period after `date`.
///
/// Monthly recurrence keeps the day of month and clamps it to the last valid
/// day of the following month (Jan 31 -> Feb 28, or Feb 29 in a leap year).
/// The function is pure: a series that was clamped continues from the
/// clamped date.
pub fn next_after(date: NaiveDate, period: RecurrencePeriod) -> NaiveDate {
    match period {
        RecurrencePeriod::Daily => date + Duration::days(1),
        RecurrencePeriod::Weekly => date + Duration::days(7),
        RecurrencePeriod::Biweekly => date + Duration::days(14),
        RecurrencePeriod::Monthly => {
            // Add one month
            let year = date.year() + (date.month() / 12) as i32;
            let month = (date.month() % 12) + 1;
            let day = std::cmp::min(date.day(), days_in_month(year, month));
            NaiveDate::from_ymd_opt(year, month, day).unwrap()
        }
    }
}

/// `next_after` folded `periods` times.
pub fn advance_by(date: NaiveDate, period: RecurrencePeriod, periods: u32) -> NaiveDate {
    (0..periods).fold(date, |current, _| next_after(current, period))
}

/// Whether an occurrence scheduled for `next_occurrence` has come due.
pub fn is_due(next_occurrence: NaiveDate, as_of: NaiveDate) -> bool {
    next_occurrence <= as_of
}

/// The first `limit` dates of the series seeded at `from`, `from` included.
pub fn upcoming(from: NaiveDate, period: RecurrencePeriod, limit: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(limit);
    let mut current = from;
    while dates.len() < limit {
        dates.push(current);
        current = next_after(current, period);
    }
    dates
}
