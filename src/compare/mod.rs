//! Trace comparison: align two traces, reconcile B's header, diff the cells.

use crate::Result;
use crate::reconcile::ColumnMapping;
use crate::table::{self, Scalar, Table};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Number of differing cells shown in the preview.
pub const PREVIEW_LIMIT: usize = 20;

/// Number of leading differing cells scanned for implicated columns.
pub const IMPLICATED_WINDOW: usize = 500;

/// One cell whose value differs between the aligned traces.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    pub row: usize,
    pub column: String,
    pub value_a: Scalar,
    pub value_b: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub equal: bool,
    /// All differing cells, row by row and left to right within a row.
    pub diffs: Vec<DiffEntry>,
}

impl Comparison {
    pub fn preview(&self) -> &[DiffEntry] {
        &self.diffs[..self.diffs.len().min(PREVIEW_LIMIT)]
    }

    /// Distinct column names among the first `IMPLICATED_WINDOW` diffs.
    pub fn implicated_columns(&self) -> BTreeSet<&str> {
        self.diffs
            .iter()
            .take(IMPLICATED_WINDOW)
            .map(|d| d.column.as_str())
            .collect()
    }
}

/// Everything the compare report needs.
#[derive(Debug, Clone)]
pub struct CompareOutcome {
    pub path_a: PathBuf,
    pub path_b: PathBuf,
    /// Row counts as loaded, before alignment.
    pub len_a: usize,
    pub len_b: usize,
    pub comparison: Comparison,
}

/// Truncate `a` to `b`'s length when `b` is shorter. `b` is never truncated.
pub fn align(a: &mut Table, b: &Table) {
    if b.len() < a.len() {
        a.truncate(b.len());
    }
}

/// Whole-table equality plus the list of differing cells.
///
/// Tables are equal only with the same header in the same order, the same row
/// count, and equal values in every cell. Diffs cover the columns both tables
/// share (in `a`'s order) over the rows both tables have.
pub fn compare(a: &Table, b: &Table) -> Comparison {
    let equal = a.columns == b.columns && a.len() == b.len() && a.rows == b.rows;
    if equal {
        return Comparison {
            equal,
            diffs: Vec::new(),
        };
    }

    let shared: Vec<(usize, usize, &str)> = a
        .columns
        .iter()
        .enumerate()
        .filter_map(|(ia, name)| b.column_index(name).map(|ib| (ia, ib, name.as_str())))
        .collect();

    let mut diffs = Vec::new();
    for (row, (ra, rb)) in a.rows.iter().zip(&b.rows).enumerate() {
        for &(ia, ib, name) in &shared {
            if ra[ia] != rb[ib] {
                diffs.push(DiffEntry {
                    row,
                    column: name.to_string(),
                    value_a: ra[ia].clone(),
                    value_b: rb[ib].clone(),
                });
            }
        }
    }

    Comparison { equal, diffs }
}

/// Load both traces, align, reconcile B with `mapping`, and compare.
pub fn run_compare(path_a: &Path, path_b: &Path, mapping: &ColumnMapping) -> Result<CompareOutcome> {
    let mut a = table::load_table(path_a)?;
    let mut b = table::load_table(path_b)?;
    let (len_a, len_b) = (a.len(), b.len());

    align(&mut a, &b);
    mapping.apply(&mut b)?;

    Ok(CompareOutcome {
        path_a: path_a.to_path_buf(),
        path_b: path_b.to_path_buf(),
        len_a,
        len_b,
        comparison: compare(&a, &b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::table::parse_table;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn t(text: &str) -> Table {
        parse_table(text, "test").unwrap()
    }

    #[test]
    fn identical_traces_are_equal() {
        let a = t("x y\n1 2\n3 4\n");
        let cmp = compare(&a, &a.clone());
        assert!(cmp.equal);
        assert!(cmp.diffs.is_empty());
        assert!(cmp.implicated_columns().is_empty());
    }

    #[test]
    fn numerically_equal_cells_match() {
        let cmp = compare(&t("x\n1\n"), &t("x\n1.000\n"));
        assert!(cmp.equal);
    }

    #[test]
    fn longer_a_is_truncated_to_b() {
        let mut a = t("x y\n1 2\n3 4\n5 6\n");
        let b = t("x y\n1 2\n3 4\n");
        align(&mut a, &b);
        assert_eq!(a.len(), 2);
        assert!(compare(&a, &b).equal);
    }

    #[test]
    fn longer_b_is_never_truncated() {
        let mut a = t("x y\n1 2\n3 4\n");
        let b = t("x y\n1 9\n3 4\n5 6\n");
        align(&mut a, &b);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 3);

        let cmp = compare(&a, &b);
        assert!(!cmp.equal);
        // Only the overlapping rows are diffed.
        assert_eq!(
            cmp.diffs,
            vec![DiffEntry {
                row: 0,
                column: "y".to_string(),
                value_a: Scalar::new("2"),
                value_b: Scalar::new("9"),
            }]
        );
    }

    #[test]
    fn column_order_matters_for_equality_but_not_for_diffs() {
        let cmp = compare(&t("x y\n1 2\n"), &t("y x\n2 1\n"));
        assert!(!cmp.equal);
        assert!(cmp.diffs.is_empty());
    }

    #[test]
    fn diffs_are_row_major_over_shared_columns() {
        let a = t("x y only_a\n1 2 0\n3 4 0\n");
        let b = t("y x only_b\n0 0 7\n4 0 7\n");
        let cmp = compare(&a, &b);

        let cells: Vec<(usize, &str)> = cmp.diffs.iter().map(|d| (d.row, d.column.as_str())).collect();
        assert_eq!(cells, vec![(0, "x"), (0, "y"), (1, "x")]);
        assert_eq!(cmp.implicated_columns(), BTreeSet::from(["x", "y"]));
    }

    #[test]
    fn preview_and_implicated_columns_are_bounded() {
        // 600 rows differing in `a`; rows past 500 also differ in `b`.
        let mut text_a = String::from("a b\n");
        let mut text_b = String::from("a b\n");
        for i in 0..600 {
            text_a.push_str(&format!("{} 0\n", i));
            let b_val = if i >= 500 { 1 } else { 0 };
            text_b.push_str(&format!("{} {}\n", i + 1, b_val));
        }
        let cmp = compare(&t(&text_a), &t(&text_b));

        assert_eq!(cmp.diffs.len(), 700);
        assert_eq!(cmp.preview().len(), PREVIEW_LIMIT);
        assert_eq!(cmp.implicated_columns(), BTreeSet::from(["a"]));
    }

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn run_compare_reconciles_legacy_header() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(
            dir.path(),
            "a.txt",
            "iter Data-ld-ln Full-ld-ln\n0 -1.5 -2.5\n1 -1.6 -2.6\n2 -1.7 -2.7\n",
        );
        let b = write(
            dir.path(),
            "b.txt",
            "iter Complete-ld-ln-avg Data-ld-ln Gene-ld-ln\n0 -1.5 -2.5 9\n1 -1.6 -2.9 9\n",
        );

        let out = run_compare(&a, &b, &ColumnMapping::legacy()).unwrap();
        assert_eq!((out.len_a, out.len_b), (3, 2));
        assert!(!out.comparison.equal);
        assert_eq!(out.comparison.diffs.len(), 1);
        assert_eq!(out.comparison.diffs[0].column, "Full-ld-ln");
        assert_eq!(out.comparison.diffs[0].row, 1);
    }

    #[test]
    fn run_compare_fails_on_missing_legacy_columns() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.txt", "x y\n1 2\n");
        let b = write(dir.path(), "b.txt", "x y\n1 2\n");

        let err = run_compare(&a, &b, &ColumnMapping::legacy()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BenchError>(),
            Some(BenchError::Schema(_))
        ));
    }
}
