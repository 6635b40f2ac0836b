use crate::Result;
use crate::error::BenchError;
use crate::table::{Scalar, Table};

use anyhow::Context;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// Load a whitespace-delimited trace file. The first non-blank line is the
/// header; every following non-blank line must carry one field per column.
///
/// Example:
/// Iteration   Data-ld-ln   Full-ld-ln
/// 0           -1834.2      -1901.7
pub fn load_table(path: &Path) -> Result<Table> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(BenchError::NotFound(path.to_path_buf()).into());
        }
        Err(e) => {
            return Err(BenchError::Io(e))
                .with_context(|| format!("read trace file {}", path.display()));
        }
    };

    parse_table(&text, &path.display().to_string())
}

/// Parse table text; `origin` names the source in error messages.
pub fn parse_table(text: &str, origin: &str) -> Result<Table> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(lineno, line)| (lineno + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(parse_error(origin, "missing header line"));
    };

    let columns: Vec<String> = header.split_whitespace().map(str::to_string).collect();

    let mut seen = BTreeSet::new();
    for col in &columns {
        if !seen.insert(col.as_str()) {
            return Err(parse_error(origin, format!("duplicate column {:?}", col)));
        }
    }

    let mut table = Table::new(columns);
    for (lno, line) in lines {
        let row: Vec<Scalar> = line.split_whitespace().map(Scalar::new).collect();
        if row.len() != table.columns.len() {
            return Err(parse_error(
                &format!("{}:{}", origin, lno),
                format!(
                    "expected {} fields, found {}",
                    table.columns.len(),
                    row.len()
                ),
            ));
        }
        table.rows.push(row);
    }

    Ok(table)
}

fn parse_error(origin: &str, message: impl Into<String>) -> anyhow::Error {
    BenchError::Parse {
        origin: origin.to_string(),
        message: message.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn parses_header_and_rows_with_variable_spacing() {
        let t = parse_table("  a\tb   c\n1 2 3\n\n 4  5\t6 \n", "t").unwrap();
        assert_eq!(t.columns, vec!["a", "b", "c"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.cell(1, 2).map(Scalar::raw), Some("6"));
    }

    #[test]
    fn header_only_is_an_empty_table() {
        let t = parse_table("a b\n", "t").unwrap();
        assert_eq!(t.columns, vec!["a", "b"]);
        assert!(t.is_empty());
    }

    #[test]
    fn wrong_field_count_is_a_parse_error() {
        let err = parse_table("a b\n1 2\n3\n", "trace.txt").unwrap_err();
        match err.downcast_ref::<BenchError>() {
            Some(BenchError::Parse { origin, .. }) => assert_eq!(origin, "trace.txt:3"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let err = parse_table("\n  \n", "t").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BenchError>(),
            Some(BenchError::Parse { .. })
        ));
    }

    #[test]
    fn duplicate_header_is_a_parse_error() {
        let err = parse_table("a a\n1 2\n", "t").unwrap_err();
        assert!(err.to_string().contains("duplicate column"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BenchError>(),
            Some(BenchError::NotFound(_))
        ));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.txt");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "x y\n1 2").unwrap();

        let t = load_table(&path).unwrap();
        assert_eq!(t.columns, vec!["x", "y"]);
        assert_eq!(t.len(), 1);
    }
}
