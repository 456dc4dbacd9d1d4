/// Non-trading day detection: every date in a range that the market data never saw
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::error::Result;
use crate::types::{DateRange, DayMode, GapReport, KnownDates};

/// Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Dates in `range` absent from `known`, ascending.
///
/// With [`DayMode::WeekdaysOnly`] Saturdays and Sundays are dropped, so only
/// weekday closures remain.
pub fn find_missing_dates(known: &KnownDates, range: DateRange, mode: DayMode) -> Vec<NaiveDate> {
    range
        .days()
        .filter(|date| !known.contains(date))
        .filter(|date| mode.includes_weekends() || !is_weekend(*date))
        .collect()
}

/// Same as [`find_missing_dates`] for raw bounds; fails when `start > end`
pub fn find_missing_between(
    known: &KnownDates,
    start: NaiveDate,
    end: NaiveDate,
    mode: DayMode,
) -> Result<Vec<NaiveDate>> {
    let range = DateRange::new(start, end)?;
    Ok(find_missing_dates(known, range, mode))
}

/// Run the gap search and account for every day in the range
pub fn analyze(known: &KnownDates, range: DateRange, mode: DayMode) -> GapReport {
    let missing = find_missing_dates(known, range, mode);
    let days_in_range = range.len_days();
    let known_in_range = known.count_in(&range);

    // Whatever is neither traded nor reported was filtered out as a weekend
    let weekends_excluded = days_in_range - known_in_range - missing.len();

    debug!(
        "Gap analysis {} to {} (mode {}): {} days, {} traded, {} missing, {} weekend days skipped",
        range.start(),
        range.end(),
        mode,
        days_in_range,
        known_in_range,
        missing.len(),
        weekends_excluded
    );

    GapReport {
        range,
        mode,
        missing,
        days_in_range,
        known_in_range,
        weekends_excluded,
    }
}
