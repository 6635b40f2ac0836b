//! Report output: human-readable text for stdout and the CSV summary file.

pub mod csv;
pub mod text;

pub use self::csv::write_summary_csv;
pub use self::text::{render_comparison, render_summary};
