//! Per-file artifact kinds and the scalar each one contributes to a run.

use crate::Result;
use crate::diagnostics;
use crate::error::BenchError;

use anyhow::Context;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Recorded for `Time` when a `.out` file has no `Time used:` line.
pub const TIME_NOT_AVAILABLE: &str = "NA";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `*.err`: stderr capture.
    Err,
    /// `*trace.txt`: one header line plus one line per completed iteration.
    Trace,
    /// `*.ctl`: control file with an `mcmc-iterations <N>` directive.
    Ctl,
    /// `*.out`: stdout capture, optionally with `Time used: <text>`.
    Out,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [Self::Err, Self::Trace, Self::Ctl, Self::Out];

    /// Classify by file name suffix. Anything else is not an artifact.
    pub fn classify(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| file_name.ends_with(kind.suffix()))
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Err => ".err",
            Self::Trace => "trace.txt",
            Self::Ctl => ".ctl",
            Self::Out => ".out",
        }
    }

    /// File name with the kind suffix and any trailing separator removed.
    pub fn stem(self, file_name: &str) -> &str {
        file_name
            .strip_suffix(self.suffix())
            .unwrap_or(file_name)
            .trim_end_matches(['.', '-', '_'])
    }
}

/// `"yes"` if the stderr capture is non-empty.
pub fn error_flag(path: &Path) -> Result<&'static str> {
    let meta = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    Ok(if meta.len() != 0 { "yes" } else { "no" })
}

/// Lines in the trace minus the header line.
pub fn completed_iterations(path: &Path) -> Result<u64> {
    let bytes = fs::read(path).with_context(|| format!("read trace file {}", path.display()))?;
    let lines = count_lines(&bytes);
    if lines == 0 {
        return Err(BenchError::Count(path.to_path_buf()).into());
    }
    Ok(lines - 1)
}

/// Newline-terminated lines, plus a final unterminated one.
fn count_lines(bytes: &[u8]) -> u64 {
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count() as u64;
    match bytes.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

/// Compiled patterns for the text artifacts.
pub struct Extractors {
    mcmc_iterations: Regex,
    time_used: Regex,
}

impl Extractors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            mcmc_iterations: Regex::new(r"mcmc-iterations\s*(\d+)")?,
            time_used: Regex::new(r"Time used:\s*(.*)")?,
        })
    }

    /// The digit run following `mcmc-iterations`.
    pub fn configured_iterations(&self, path: &Path) -> Result<String> {
        let text = read_text(path)?;
        match self.mcmc_iterations.captures(&text).and_then(|c| c.get(1)) {
            Some(m) => Ok(m.as_str().to_string()),
            None => Err(BenchError::Extraction {
                field: "mcmc-iterations",
                path: path.to_path_buf(),
            }
            .into()),
        }
    }

    /// The rest of the `Time used:` line, or `NA` when there is none.
    pub fn time_used(&self, path: &Path) -> Result<String> {
        let text = read_text(path)?;
        match self.time_used.captures(&text).and_then(|c| c.get(1)) {
            Some(m) => Ok(m.as_str().trim_end().to_string()),
            None => {
                diagnostics::warn(format!(
                    "{} has no 'Time used:' line, recording {}",
                    path.display(),
                    TIME_NOT_AVAILABLE
                ));
                Ok(TIME_NOT_AVAILABLE.to_string())
            }
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
