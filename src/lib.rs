pub mod types;
pub mod error;
pub mod time;
pub mod data;
pub mod config;
pub mod runner;
pub mod cli;

pub use types::*;
pub use error::{GapError, Result};
