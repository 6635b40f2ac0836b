use crate::Result;
use crate::error::BenchError;
use crate::summary::{RunRecord, SUMMARY_COLUMNS};

use anyhow::Context;
use std::path::Path;

/// Default file name for the summary report.
pub const DEFAULT_SUMMARY_FILE: &str = "benchmarks_summary.csv";

/// Write the summary as CSV: header row, no index column.
pub fn write_summary_csv(records: &[RunRecord], path: &Path) -> Result<()> {
    // The header comes from SUMMARY_COLUMNS, not from serde field names.
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(BenchError::from)
        .with_context(|| format!("create {}", path.display()))?;

    writer
        .write_record(SUMMARY_COLUMNS)
        .map_err(BenchError::from)?;
    for record in records {
        writer.serialize(record).map_err(BenchError::from)?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;

    Ok(())
}
