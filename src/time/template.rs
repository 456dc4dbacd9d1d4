/// Output date templates built from `YYYY`, `MM` and `DD` tokens
use chrono::{Datelike, NaiveDate};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::{GapError, Result};

pub const DEFAULT_TEMPLATE: &str = "YYYY-MM-DD";

/// One piece of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// `YYYY`: 4-digit zero-padded year
    Year,
    /// `MM`: 2-digit zero-padded month
    Month,
    /// `DD`: 2-digit zero-padded day
    Day,
}

/// A date layout such as `YYYY-MM-DD` or `DD/MM/YYYY`.
///
/// The template is split left to right; at each position the tokens `YYYY`,
/// `MM` and `DD` are matched literally (case-sensitive) and anything else is
/// copied through. `MMM` therefore reads as a month followed by a literal `M`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl DateTemplate {
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(ch) = rest.chars().next() {
            let token = if rest.starts_with("YYYY") {
                Some((Segment::Year, 4))
            } else if rest.starts_with("MM") {
                Some((Segment::Month, 2))
            } else if rest.starts_with("DD") {
                Some((Segment::Day, 2))
            } else {
                None
            };

            match token {
                Some((segment, len)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                    rest = &rest[len..];
                }
                None => {
                    literal.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        DateTemplate {
            source: template.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// False when the template is pure literal text and every date renders the same
    pub fn has_tokens(&self) -> bool {
        self.segments
            .iter()
            .any(|s| !matches!(s, Segment::Literal(_)))
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::with_capacity(self.source.len() + 2);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Year => out.push_str(&format!("{:04}", date.year())),
                Segment::Month => out.push_str(&format!("{:02}", date.month())),
                Segment::Day => out.push_str(&format!("{:02}", date.day())),
            }
        }
        out
    }

    /// Read back a date written with this template
    pub fn parse_date(&self, text: &str) -> Result<NaiveDate> {
        let mismatch = || {
            GapError::InvalidDateFormat(format!(
                "'{}' does not match the '{}' format",
                text, self.source
            ))
        };

        let mut rest = text;
        let mut year = None;
        let mut month = None;
        let mut day = None;

        for segment in &self.segments {
            let (slot, width) = match segment {
                Segment::Literal(lit) => {
                    rest = rest.strip_prefix(lit.as_str()).ok_or_else(mismatch)?;
                    continue;
                }
                Segment::Year => (&mut year, 4),
                Segment::Month => (&mut month, 2),
                Segment::Day => (&mut day, 2),
            };
            let (value, tail) = take_digits(rest, width).ok_or_else(mismatch)?;
            if !assign(slot, value) {
                return Err(mismatch());
            }
            rest = tail;
        }
        if !rest.is_empty() {
            return Err(mismatch());
        }

        let (Some(year), Some(month), Some(day)) = (year, month, day) else {
            return Err(GapError::InvalidDateFormat(format!(
                "format '{}' needs YYYY, MM and DD to identify a date",
                self.source
            )));
        };

        NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(|| {
            GapError::InvalidDateFormat(format!("'{}' is not a valid calendar date", text))
        })
    }
}

/// Render `date` with `template`
pub fn format_date(date: NaiveDate, template: &DateTemplate) -> String {
    template.format(date)
}

/// Split off exactly `width` leading ASCII digits
fn take_digits(s: &str, width: usize) -> Option<(u32, &str)> {
    let digits = s.as_bytes().get(..width)?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = s[..width].parse().ok()?;
    Some((value, &s[width..]))
}

/// Repeated tokens must agree with the first occurrence
fn assign(slot: &mut Option<u32>, value: u32) -> bool {
    match *slot {
        Some(previous) if previous != value => false,
        _ => {
            *slot = Some(value);
            true
        }
    }
}

impl Default for DateTemplate {
    fn default() -> Self {
        DateTemplate::parse(DEFAULT_TEMPLATE)
    }
}

impl FromStr for DateTemplate {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(DateTemplate::parse(s))
    }
}

impl fmt::Display for DateTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DateRange;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    #[test]
    fn test_segments() {
        assert_eq!(
            DateTemplate::parse("YYYY-MM-DD").segments(),
            &[Segment::Year, lit("-"), Segment::Month, lit("-"), Segment::Day]
        );
        assert_eq!(
            DateTemplate::parse("YYYYMMDD").segments(),
            &[Segment::Year, Segment::Month, Segment::Day]
        );
        assert_eq!(
            DateTemplate::parse("MMM").segments(),
            &[Segment::Month, lit("M")]
        );
        assert_eq!(
            DateTemplate::parse("yyyy-MM").segments(),
            &[lit("yyyy-"), Segment::Month]
        );
        assert!(DateTemplate::parse("").segments().is_empty());
    }

    #[test]
    fn test_format() {
        let d = date(2024, 1, 3);
        assert_eq!(DateTemplate::default().format(d), "2024-01-03");
        assert_eq!(format_date(d, &DateTemplate::parse("DD/MM/YYYY")), "03/01/2024");
        assert_eq!(format_date(d, &DateTemplate::parse("MM-DD-YYYY")), "01-03-2024");
        assert_eq!(format_date(d, &DateTemplate::parse("YYYYMMDD")), "20240103");
        assert_eq!(format_date(d, &DateTemplate::parse("Day DD")), "Day 03");
        assert_eq!(format_date(date(987, 6, 5), &DateTemplate::default()), "0987-06-05");
    }

    #[test]
    fn test_literal_only_template() {
        let template = DateTemplate::parse("closed");
        assert!(!template.has_tokens());
        assert_eq!(template.format(date(2024, 1, 3)), "closed");
        assert!(DateTemplate::default().has_tokens());
    }

    #[test]
    fn test_unicode_literals_pass_through() {
        let template = DateTemplate::parse("YYYY年MM月DD日");
        assert_eq!(template.format(date(2024, 12, 25)), "2024年12月25日");
        assert_eq!(template.parse_date("2024年12月25日").unwrap(), date(2024, 12, 25));
    }

    #[test]
    fn test_round_trip() {
        let range = DateRange::new(date(2023, 12, 1), date(2024, 3, 31)).unwrap();
        for pattern in ["YYYY-MM-DD", "DD/MM/YYYY", "YYYYMMDD", "MM.DD.YYYY"] {
            let template = DateTemplate::parse(pattern);
            for d in range.days() {
                assert_eq!(template.parse_date(&template.format(d)).unwrap(), d);
            }
        }
    }

    #[test]
    fn test_parse_date_rejects_bad_input() {
        let template = DateTemplate::default();
        assert!(template.parse_date("2024/01/03").is_err());
        assert!(template.parse_date("2024-1-03").is_err());
        assert!(template.parse_date("2024-01-03 ").is_err());
        assert!(template.parse_date("2023-02-29").is_err());
        assert!(template.parse_date("").is_err());
    }

    #[test]
    fn test_parse_date_needs_every_token() {
        let err = DateTemplate::parse("YYYY-MM").parse_date("2024-01").unwrap_err();
        assert!(matches!(err, GapError::InvalidDateFormat(_)));
    }

    #[test]
    fn test_repeated_tokens_must_agree() {
        let template = DateTemplate::parse("YYYY-MM-DD (DD)");
        assert_eq!(template.format(date(2024, 1, 3)), "2024-01-03 (03)");
        assert_eq!(template.parse_date("2024-01-03 (03)").unwrap(), date(2024, 1, 3));
        assert!(template.parse_date("2024-01-03 (04)").is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let template: DateTemplate = "DD-MM-YYYY".parse().unwrap();
        assert_eq!(template.to_string(), "DD-MM-YYYY");
        assert_eq!(template.as_str(), "DD-MM-YYYY");
    }
}
