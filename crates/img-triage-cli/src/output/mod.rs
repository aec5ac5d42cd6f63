//! Output formatting for CLI.

mod csv;
mod json;
mod progress;

pub use self::csv::{render_csv, CsvOutput};
pub use json::{JsonMode, JsonOutput};
pub use progress::ProgressBar;
