//! Column mapping file (mapping.json).
//!
//! JSON shape:
//! {
//!   "renames": [
//!     { "from": "Complete-ld-ln-avg", "to": "Data-ld-ln" },
//!     ["Data-ld-ln", "Full-ld-ln"]          // pair form is accepted too
//!   ],
//!   "drop": ["Gene-ld-ln"]
//! }
//!
//! Renames are resolved against the table's original header, so one rename
//! never feeds into another.

use crate::Result;
use crate::error::BenchError;
use crate::table::Table;

use anyhow::Context;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingSpec {
    #[serde(default)]
    pub renames: Vec<RenameSpec>,

    #[serde(default)]
    pub drop: Vec<String>,
}

/// Rename entries in mapping.json.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RenameSpec {
    Explicit { from: String, to: String },
    Pair(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Validated mapping: unique sources, unique targets, no column both renamed
/// and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    renames: Vec<Rename>,
    drop: BTreeSet<String>,
}

impl MappingSpec {
    pub fn validate_and_build(&self) -> Result<ColumnMapping> {
        let mut renames = Vec::with_capacity(self.renames.len());
        let mut sources = BTreeSet::new();
        let mut targets = BTreeSet::new();

        for spec in &self.renames {
            let (from, to) = match spec {
                RenameSpec::Explicit { from, to } | RenameSpec::Pair(from, to) => (from, to),
            };
            if !sources.insert(from.as_str()) {
                return Err(mapping_error(format!("column {:?} renamed twice", from)));
            }
            if !targets.insert(to.as_str()) {
                return Err(mapping_error(format!(
                    "more than one column renamed to {:?}",
                    to
                )));
            }
            renames.push(Rename {
                from: from.clone(),
                to: to.clone(),
            });
        }

        let mut drop = BTreeSet::new();
        for col in &self.drop {
            if sources.contains(col.as_str()) {
                return Err(mapping_error(format!(
                    "column {:?} is both renamed and dropped",
                    col
                )));
            }
            drop.insert(col.clone());
        }

        Ok(ColumnMapping { renames, drop })
    }
}

impl ColumnMapping {
    /// The fixed migration between the two trace format versions:
    /// `Complete-ld-ln-avg -> Data-ld-ln`, `Data-ld-ln -> Full-ld-ln`, and
    /// `Gene-ld-ln` dropped.
    pub fn legacy() -> Self {
        Self {
            renames: vec![
                Rename {
                    from: "Complete-ld-ln-avg".to_string(),
                    to: "Data-ld-ln".to_string(),
                },
                Rename {
                    from: "Data-ld-ln".to_string(),
                    to: "Full-ld-ln".to_string(),
                },
            ],
            drop: BTreeSet::from(["Gene-ld-ln".to_string()]),
        }
    }

    /// Read and validate a mapping file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read mapping file {}", path.display()))?;
        let spec: MappingSpec = serde_json::from_str(&text)
            .with_context(|| format!("parse mapping file {}", path.display()))?;
        spec.validate_and_build()
    }

    pub fn renames(&self) -> &[Rename] {
        &self.renames
    }

    pub fn dropped(&self) -> impl Iterator<Item = &str> {
        self.drop.iter().map(String::as_str)
    }

    /// Rename then drop columns of `table` in place.
    ///
    /// Every source and dropped column must be present in the original header.
    pub fn apply(&self, table: &mut Table) -> Result<()> {
        // 1) Every referenced column must exist up front.
        let referenced = self
            .renames
            .iter()
            .map(|r| r.from.as_str())
            .chain(self.dropped());
        for col in referenced {
            if table.column_index(col).is_none() {
                return Err(BenchError::Schema(format!(
                    "column {:?} not found; available: {}",
                    col,
                    table.columns.join(", ")
                ))
                .into());
            }
        }

        // 2) Simultaneous rename, keyed on the original names.
        let targets: BTreeMap<&str, &str> = self
            .renames
            .iter()
            .map(|r| (r.from.as_str(), r.to.as_str()))
            .collect();

        let mut keep = Vec::with_capacity(table.columns.len());
        let mut columns = Vec::with_capacity(table.columns.len());
        for (idx, name) in table.columns.iter().enumerate() {
            if self.drop.contains(name) {
                continue;
            }
            let renamed = targets.get(name.as_str()).copied().unwrap_or(name.as_str());
            keep.push(idx);
            columns.push(renamed.to_string());
        }

        // 3) The final header must still be unambiguous.
        let mut seen = BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.as_str()) {
                return Err(BenchError::Schema(format!(
                    "mapping produces duplicate column {:?}",
                    col
                ))
                .into());
            }
        }

        for row in &mut table.rows {
            let mut cells = std::mem::take(row);
            *row = keep.iter().map(|&idx| std::mem::take(&mut cells[idx])).collect();
        }
        table.columns = columns;

        Ok(())
    }
}

fn mapping_error(msg: String) -> anyhow::Error {
    BenchError::Mapping(msg).into()
}
