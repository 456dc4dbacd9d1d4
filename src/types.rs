/// Core type definitions for the market dates tool
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{GapError, Result};
use crate::time::DateTemplate;

/// chrono layout used when echoing dates back in logs
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Which non-trading days end up in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayMode {
    /// `N`: weekday closures only (holidays, unscheduled closures)
    #[default]
    WeekdaysOnly,
    /// `W`: weekday closures plus every Saturday and Sunday
    AllDays,
}

impl DayMode {
    pub fn as_str(&self) -> &str {
        match self {
            DayMode::WeekdaysOnly => "N",
            DayMode::AllDays => "W",
        }
    }

    pub fn includes_weekends(&self) -> bool {
        matches!(self, DayMode::AllDays)
    }
}

impl fmt::Display for DayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayMode {
    type Err = GapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "N" | "n" => Ok(DayMode::WeekdaysOnly),
            "W" | "w" => Ok(DayMode::AllDays),
            other => Err(GapError::InvalidParameter(format!(
                "data format '{}' must be N (non-trading days) or W (non-trading days and weekends)",
                other
            ))),
        }
    }
}

/// A start or end override: an explicit date, or `All` to follow the input data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBound {
    #[default]
    All,
    Date(NaiveDate),
}

impl DateBound {
    /// Resolve against the date the input data would supply
    pub fn resolve(&self, from_data: Option<NaiveDate>) -> Option<NaiveDate> {
        match self {
            DateBound::All => from_data,
            DateBound::Date(date) => Some(*date),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, DateBound::All)
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateBound::All => f.write_str("All"),
            DateBound::Date(date) => write!(f, "{}", date.format(ISO_DATE_FORMAT)),
        }
    }
}

impl FromStr for DateBound {
    type Err = GapError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(DateBound::All);
        }
        // Exactly 4-2-2 digits; chrono alone would take signed or wider years
        DateTemplate::default()
            .parse_date(s)
            .map(DateBound::Date)
            .map_err(|_| {
                GapError::InvalidDateFormat(format!("'{}' is not in the 'YYYY-MM-DD' format", s))
            })
    }
}

/// Inclusive calendar range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(GapError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        DateRange { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the range, ascending
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Set of dates on which the market traded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownDates {
    dates: BTreeSet<NaiveDate>,
}

impl KnownDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the date was already present
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Earliest trading date
    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Latest trading date
    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn count_in(&self, range: &DateRange) -> usize {
        self.dates.range(range.start()..=range.end()).count()
    }
}

impl FromIterator<NaiveDate> for KnownDates {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        KnownDates {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Outcome of one gap analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapReport {
    pub range: DateRange,
    pub mode: DayMode,
    /// Non-trading dates, ascending
    pub missing: Vec<NaiveDate>,
    pub days_in_range: usize,
    pub known_in_range: usize,
    /// Weekend days absent from the data but left out because of the mode
    pub weekends_excluded: usize,
}

impl GapReport {
    pub fn first_missing(&self) -> Option<NaiveDate> {
        self.missing.first().copied()
    }

    pub fn last_missing(&self) -> Option<NaiveDate> {
        self.missing.last().copied()
    }
}
