pub mod reader;
pub mod writer;

pub use reader::{read_known_dates, read_known_dates_from, DATE_COLUMN};
pub use writer::{write_dates, write_rows};
