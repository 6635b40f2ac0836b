use crate::compare::{CompareOutcome, IMPLICATED_WINDOW};
use crate::summary::{RunRecord, SUMMARY_COLUMNS};
use crate::table::Scalar;

use std::fmt::Write;

/// Render the compare diagnostics: inputs, raw lengths, verdict, and for
/// unequal traces a preview of differing cells plus the implicated columns.
pub fn render_comparison(outcome: &CompareOutcome) -> String {
    let mut out = String::new();
    let cmp = &outcome.comparison;

    let _ = writeln!(out, "Trace file A: {}", outcome.path_a.display());
    let _ = writeln!(out, "Trace file B: {}", outcome.path_b.display());
    let _ = writeln!(out);
    let _ = writeln!(out, "Length of trace A: {}", outcome.len_a);
    let _ = writeln!(out, "Length of trace B: {}", outcome.len_b);
    let _ = writeln!(out);
    let _ = writeln!(out, "Are traces equal?");
    let _ = writeln!(out, "{}", cmp.equal);

    if cmp.equal {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Differences ({} cells):", cmp.diffs.len());
    let _ = writeln!(out);

    let mut rows = vec![vec![
        "row".to_string(),
        "column".to_string(),
        "Trace A".to_string(),
        "Trace B".to_string(),
    ]];
    for d in cmp.preview() {
        rows.push(vec![
            d.row.to_string(),
            d.column.clone(),
            format_value(&d.value_a),
            format_value(&d.value_b),
        ]);
    }
    write_columns(&mut out, &rows, &[true, false, true, true]);

    let columns: Vec<&str> = cmp.implicated_columns().into_iter().collect();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Columns with differences (first {} cells): [{}]",
        IMPLICATED_WINDOW,
        columns.join(", ")
    );

    out
}

/// Render the summary table with the report's column headers.
pub fn render_summary(records: &[RunRecord]) -> String {
    let mut rows = vec![SUMMARY_COLUMNS.map(str::to_string).to_vec()];
    for r in records {
        rows.push(vec![
            r.file.clone(),
            r.errors.clone(),
            r.iterations_configured.clone(),
            r.iterations_completed.to_string(),
            r.time.clone(),
        ]);
    }

    let mut out = String::new();
    write_columns(&mut out, &rows, &[false, false, true, true, false]);
    out
}

/// Numbers with five decimals, anything else verbatim.
fn format_value(v: &Scalar) -> String {
    match v.as_f64() {
        Some(x) if x.is_finite() => format!("{:.5}", x),
        _ => v.raw().to_string(),
    }
}

/// Space-padded columns; `right[i]` right-aligns column `i`.
fn write_columns(out: &mut String, rows: &[Vec<String>], right: &[bool]) {
    let ncols = rows.first().map_or(0, Vec::len);
    let widths: Vec<usize> = (0..ncols)
        .map(|c| rows.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
        .collect();

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                if right.get(c).copied().unwrap_or(false) {
                    format!("{:>w$}", cell, w = widths[c])
                } else {
                    format!("{:<w$}", cell, w = widths[c])
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
}
