/// One end-to-end pass: trading dates in, non-trading dates out
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::config::{check_output_target, validate_config, RunConfig};
use crate::data::{read_known_dates, write_dates};
use crate::error::{GapError, Result};
use crate::time::analyze;
use crate::types::{DateRange, GapReport, KnownDates};

/// Validate, read the input, find the gaps and write the output file.
///
/// Nothing is written unless every check passes first.
pub fn run(config: &RunConfig) -> Result<GapReport> {
    let span = info_span!("run", run_id = %Uuid::new_v4());
    let _guard = span.enter();

    validate_config(config)?;

    if !config.input_path.exists() {
        return Err(GapError::InputFileNotFound(config.input_path.clone()));
    }
    check_output_target(config)?;

    let known = read_known_dates(&config.input_path)?;
    let range = resolve_range(config, &known)?;

    if known.count_in(&range) == 0 {
        warn!(
            "No trading dates between {} and {}; every day in range will be reported",
            range.start(),
            range.end()
        );
    }

    let report = analyze(&known, range, config.mode);
    info!(
        "Found {} non-trading days between {} and {} (mode {})",
        report.missing.len(),
        range.start(),
        range.end(),
        config.mode
    );

    write_dates(&config.output_path, &report.missing, &config.template)?;

    Ok(report)
}

/// Explicit bounds win; `All` falls back to the earliest/latest trading date
pub fn resolve_range(config: &RunConfig, known: &KnownDates) -> Result<DateRange> {
    let empty = || GapError::EmptyInput(config.input_path.clone());
    let start = config.start.resolve(known.first()).ok_or_else(empty)?;
    let end = config.end.resolve(known.last()).ok_or_else(empty)?;
    DateRange::new(start, end)
}

/// The one-line message printed after a successful run
pub fn summary_line(config: &RunConfig, report: &GapReport) -> String {
    let weekends = if report.mode.includes_weekends() {
        "with"
    } else {
        "without"
    };
    let output = config.output_path.display();

    match (report.first_missing(), report.last_missing()) {
        (Some(first), Some(last)) => format!(
            "Non-trading days {} weekends written to {} from {} to {} complete.",
            weekends,
            output,
            config.template.format(first),
            config.template.format(last)
        ),
        _ => format!(
            "No non-trading days {} weekends found between {} and {}; wrote header only to {}.",
            weekends,
            config.template.format(report.range.start()),
            config.template.format(report.range.end()),
            output
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DateTemplate;
    use crate::types::{DateBound, DayMode};
    use chrono::NaiveDate;
    use std::fs;
    use std::path::PathBuf;

    const WEEK_CSV: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-04,4697.42,4726.78,4687.53,4688.68,4688.68,3715480000
2024-01-01,4745.20,4754.33,4722.67,4742.83,4742.83,3743050000
2024-01-02,4725.07,4729.29,4699.71,4704.81,4704.81,3950760000
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Fresh directory with `input.csv` holding `contents`
    fn scratch(contents: &str) -> (PathBuf, RunConfig) {
        let dir = std::env::temp_dir().join(format!("market_dates_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.csv");
        fs::write(&input, contents).unwrap();

        let config = RunConfig {
            input_path: input,
            output_path: dir.join("dates.csv"),
            ..RunConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn test_weekday_run() {
        let (dir, config) = scratch(WEEK_CSV);
        let config = RunConfig {
            end: DateBound::Date(date(2024, 1, 5)),
            ..config
        };

        let report = run(&config).unwrap();
        assert_eq!(report.missing, vec![date(2024, 1, 3), date(2024, 1, 5)]);
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "Date\n2024-01-03\n2024-01-05\n"
        );
        assert_eq!(
            summary_line(&config, &report),
            format!(
                "Non-trading days without weekends written to {} from 2024-01-03 to 2024-01-05 complete.",
                config.output_path.display()
            )
        );

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_all_days_run_with_custom_format() {
        let (dir, config) = scratch(WEEK_CSV);
        let config = RunConfig {
            mode: DayMode::AllDays,
            template: DateTemplate::parse("DD/MM/YYYY"),
            end: DateBound::Date(date(2024, 1, 8)),
            ..config
        };

        let report = run(&config).unwrap();
        assert_eq!(report.missing.len(), 5);
        assert_eq!(
            fs::read_to_string(&config.output_path).unwrap(),
            "Date\n03/01/2024\n05/01/2024\n06/01/2024\n07/01/2024\n08/01/2024\n"
        );
        assert!(summary_line(&config, &report).starts_with("Non-trading days with weekends"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_range_follows_data_by_default() {
        let (dir, config) = scratch(WEEK_CSV);

        let report = run(&config).unwrap();
        assert_eq!(report.range, DateRange::new(date(2024, 1, 1), date(2024, 1, 4)).unwrap());
        assert_eq!(report.missing, vec![date(2024, 1, 3)]);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_nothing_missing_writes_header() {
        let (dir, config) = scratch("Date\n2024-01-05\n2024-01-08\n");

        let report = run(&config).unwrap();
        assert!(report.missing.is_empty());
        assert_eq!(report.weekends_excluded, 2);
        assert_eq!(fs::read_to_string(&config.output_path).unwrap(), "Date\n");
        assert_eq!(
            summary_line(&config, &report),
            format!(
                "No non-trading days without weekends found between 2024-01-05 and 2024-01-08; wrote header only to {}.",
                config.output_path.display()
            )
        );

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_input() {
        let (dir, config) = scratch("");
        let config = RunConfig {
            input_path: dir.join("^SPX.csv"),
            ..config
        };

        assert!(matches!(
            run(&config).unwrap_err(),
            GapError::InputFileNotFound(_)
        ));
        assert!(!config.output_path.exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_start_after_data_end_is_rejected() {
        let (dir, config) = scratch(WEEK_CSV);
        let config = RunConfig {
            start: DateBound::Date(date(2024, 2, 1)),
            ..config
        };

        match run(&config).unwrap_err() {
            GapError::InvalidRange { start, end } => {
                assert_eq!(start, date(2024, 2, 1));
                assert_eq!(end, date(2024, 1, 4));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!config.output_path.exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_empty_input_needs_explicit_bounds() {
        let (dir, config) = scratch("Date,Close\n");
        assert!(matches!(run(&config).unwrap_err(), GapError::EmptyInput(_)));
        assert!(!config.output_path.exists());

        let config = RunConfig {
            start: DateBound::Date(date(2024, 1, 1)),
            end: DateBound::Date(date(2024, 1, 7)),
            ..config
        };
        let report = run(&config).unwrap();
        assert_eq!(report.missing.len(), 5);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_repeat_runs_match() {
        let (dir, config) = scratch(WEEK_CSV);

        let first = run(&config).unwrap();
        let first_output = fs::read_to_string(&config.output_path).unwrap();
        let second = run(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(first_output, fs::read_to_string(&config.output_path).unwrap());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_output_aliasing_input_is_refused() {
        let (dir, config) = scratch(WEEK_CSV);
        let dir_name = dir.file_name().unwrap().to_owned();
        let alias = dir.join("..").join(dir_name).join("input.csv");
        let config = RunConfig {
            output_path: alias,
            ..config
        };

        assert!(matches!(run(&config).unwrap_err(), GapError::ConfigError(_)));
        assert_eq!(fs::read_to_string(&config.input_path).unwrap(), WEEK_CSV);

        fs::remove_dir_all(dir).unwrap();
    }
}
