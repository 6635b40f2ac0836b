//! Benchmark run summary: walk an output tree, pull one scalar out of each run
//! artifact, and join the artifacts of each run into a single record.
//!
//! Artifacts are joined on an explicit run id derived from their path (see
//! [`GroupBy`]); a run missing any of the four artifacts is an error.

pub mod artifact;

pub use artifact::{ArtifactKind, Extractors, TIME_NOT_AVAILABLE};

use crate::Result;
use crate::error::BenchError;

use anyhow::Context;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Report column headers, in [`RunRecord`] field order.
pub const SUMMARY_COLUMNS: [&str; 5] = [
    "File",
    "Errors",
    "Num MCMC iterations",
    "Num iterations in trace",
    "Time",
];

/// One row of the summary table. Field order is the report's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub file: String,
    pub errors: String,
    pub iterations_configured: String,
    pub iterations_completed: u64,
    pub time: String,
}

/// How artifacts are attributed to runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GroupBy {
    /// Same directory and same file name stem (`run1.out`, `run1.ctl`, `run1.trace.txt`, ...).
    #[default]
    Stem,
    /// Every run lives in its own directory.
    Directory,
}

impl GroupBy {
    /// Run id for an artifact at `rel` (relative to the walk root).
    fn run_id(self, rel: &Path, kind: ArtifactKind, file_name: &str) -> String {
        let dir = rel
            .parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        match self {
            GroupBy::Directory => dir,
            GroupBy::Stem => {
                let stem = kind.stem(file_name);
                match (dir.is_empty(), stem.is_empty()) {
                    (true, _) => stem.to_string(),
                    (false, true) => dir,
                    (false, false) => format!("{}/{}", dir, stem),
                }
            }
        }
    }
}

#[derive(Debug)]
struct Found<T> {
    path: PathBuf,
    value: T,
}

/// Artifacts seen so far for one run.
#[derive(Debug, Default)]
struct PartialRun {
    errors: Option<Found<&'static str>>,
    completed: Option<Found<u64>>,
    configured: Option<Found<String>>,
    out: Option<Found<(String, String)>>,
}

impl PartialRun {
    fn finish(self, run: &str) -> Result<RunRecord> {
        match self {
            PartialRun {
                errors: Some(errors),
                completed: Some(completed),
                configured: Some(configured),
                out: Some(out),
            } => {
                let (file, time) = out.value;
                Ok(RunRecord {
                    file,
                    errors: errors.value.to_string(),
                    iterations_configured: configured.value,
                    iterations_completed: completed.value,
                    time,
                })
            }
            partial => {
                let present = [
                    (ArtifactKind::Err, partial.errors.is_some()),
                    (ArtifactKind::Trace, partial.completed.is_some()),
                    (ArtifactKind::Ctl, partial.configured.is_some()),
                    (ArtifactKind::Out, partial.out.is_some()),
                ];
                let missing: Vec<&str> = present
                    .iter()
                    .filter(|(_, seen)| !seen)
                    .map(|(kind, _)| kind.suffix())
                    .collect();
                Err(BenchError::MissingArtifact {
                    run: run.to_string(),
                    missing: missing.join(", "),
                }
                .into())
            }
        }
    }
}

/// Put `value` into `slot`, refusing a second artifact of the same kind.
fn fill<T>(slot: &mut Option<Found<T>>, run: &str, kind: ArtifactKind, path: &Path, value: T) -> Result<()> {
    if let Some(prev) = slot {
        return Err(BenchError::DuplicateArtifact {
            run: run.to_string(),
            kind: kind.suffix(),
            first: prev.path.clone(),
            second: path.to_path_buf(),
        }
        .into());
    }
    *slot = Some(Found {
        path: path.to_path_buf(),
        value,
    });
    Ok(())
}

/// Number of direct entries under `root` (one per benchmark in the usual layout).
pub fn count_top_level_entries(root: &Path) -> Result<usize> {
    ensure_dir(root)?;
    let entries = fs::read_dir(root).with_context(|| format!("list {}", root.display()))?;
    Ok(entries.count())
}

/// Walk `root`, extract every artifact, and return one record per run sorted
/// by `File`. Any extraction failure aborts the whole summary.
pub fn collect_runs(root: &Path, group_by: GroupBy) -> Result<Vec<RunRecord>> {
    ensure_dir(root)?;
    let extractors = Extractors::new()?;

    let mut runs: BTreeMap<String, PartialRun> = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(BenchError::from)?;
        // Directory links are not descended into; file links are read
        // through.
        if !entry.path().is_file() {
            continue;
        }

        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        let Some(kind) = ArtifactKind::classify(&file_name) else {
            continue;
        };

        let rel = path.strip_prefix(root).unwrap_or(path);
        let run_id = group_by.run_id(rel, kind, &file_name);
        let run = runs.entry(run_id.clone()).or_default();

        match kind {
            ArtifactKind::Err => {
                let flag = artifact::error_flag(path)?;
                fill(&mut run.errors, &run_id, kind, path, flag)?;
            }
            ArtifactKind::Trace => {
                let completed = artifact::completed_iterations(path)?;
                fill(&mut run.completed, &run_id, kind, path, completed)?;
            }
            ArtifactKind::Ctl => {
                let configured = extractors.configured_iterations(path)?;
                fill(&mut run.configured, &run_id, kind, path, configured)?;
            }
            ArtifactKind::Out => {
                let time = extractors.time_used(path)?;
                fill(&mut run.out, &run_id, kind, path, (file_name.to_string(), time))?;
            }
        }
    }

    let mut records = runs
        .into_iter()
        .map(|(run, partial)| partial.finish(&run))
        .collect::<Result<Vec<_>>>()?;
    records.sort_by(|a, b| a.file.cmp(&b.file));

    Ok(records)
}

fn ensure_dir(root: &Path) -> Result<()> {
    if !root.is_dir() {
        return Err(BenchError::NotFound(root.to_path_buf()).into());
    }
    Ok(())
}
