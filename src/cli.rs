/// Command-line surface
use clap::Parser;
use std::path::PathBuf;

use crate::config::Overrides;
use crate::time::DateTemplate;
use crate::types::{DateBound, DayMode};

#[derive(Parser, Debug)]
#[command(
    name = "market-dates",
    version,
    about = "List the days a market was closed, from a CSV of its trading days",
    long_about = "Reads a historical price export (for example the Yahoo Finance ^SPX.csv download) \
and writes every calendar date between the first and last trading day that has no price row.\n\n\
By default only weekday closures are written; use --data_format W to include weekends too.\n\
Options not given on the command line are taken from --config, then from built-in defaults."
)]
pub struct Cli {
    /// Input CSV with a Date column [default: ^SPX.csv]
    #[arg(long = "in_filename", visible_alias = "in-filename", value_name = "FILE")]
    pub in_filename: Option<PathBuf>,

    /// Output CSV [default: dates.csv]
    #[arg(long = "out_filename", visible_alias = "out-filename", value_name = "FILE")]
    pub out_filename: Option<PathBuf>,

    /// Output date format built from YYYY, MM and DD [default: YYYY-MM-DD]
    #[arg(long = "out_date_format", visible_alias = "out-date-format", value_name = "FORMAT")]
    pub out_date_format: Option<DateTemplate>,

    /// N for non-trading weekdays only, W to include weekends [default: N]
    #[arg(long = "data_format", visible_alias = "data-format", value_name = "N|W")]
    pub data_format: Option<DayMode>,

    /// First date to check, YYYY-MM-DD, or All for the first trading day [default: All]
    #[arg(long = "start_date", visible_alias = "start-date", value_name = "DATE")]
    pub start_date: Option<DateBound>,

    /// Last date to check, YYYY-MM-DD, or All for the last trading day [default: All]
    #[arg(long = "end_date", visible_alias = "end-date", value_name = "DATE")]
    pub end_date: Option<DateBound>,

    /// TOML file with any of the options above
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset [default: info]
    #[arg(long = "log_level", visible_alias = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            input_path: self.in_filename.clone(),
            output_path: self.out_filename.clone(),
            template: self.out_date_format.clone(),
            mode: self.data_format,
            start: self.start_date,
            end: self.end_date,
            log_level: self.log_level.clone(),
        }
    }
}
