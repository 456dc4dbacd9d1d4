pub mod gaps;
pub mod template;

pub use gaps::{analyze, find_missing_between, find_missing_dates, is_weekend};
pub use template::{format_date, DateTemplate, Segment, DEFAULT_TEMPLATE};
