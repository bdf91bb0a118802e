//! Column-oriented loading of observation files.
//!
//! Observation files are whitespace-separated numeric tables; `#` starts a
//! comment. The parser only ever asks for 2 or 3 columns and hands the
//! columns over unchanged.

use std::path::Path;

use crate::error::ObservationError;

/// Loads `columns` numeric columns from a file.
///
/// The default [`TextColumnLoader`] reads plain text; callers can plug in
/// their own loader through [`crate::Context`].
pub trait ColumnLoader {
    fn load(&self, path: &Path, columns: usize) -> Result<Vec<Vec<f64>>, ObservationError>;
}

/// Plain-text table loader.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextColumnLoader;

impl ColumnLoader for TextColumnLoader {
    fn load(&self, path: &Path, columns: usize) -> Result<Vec<Vec<f64>>, ObservationError> {
        let text = std::fs::read_to_string(path)?;
        parse_columns(&text, columns)
    }
}

/// Parse a whitespace-separated table into `columns` column vectors.
///
/// Every data row must have exactly `columns` fields.
pub fn parse_columns(text: &str, columns: usize) -> Result<Vec<Vec<f64>>, ObservationError> {
    let mut out: Vec<Vec<f64>> = vec![Vec::new(); columns];

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let data = raw.split('#').next().unwrap_or("").trim();
        if data.is_empty() {
            continue;
        }

        let fields: Vec<&str> = data.split_whitespace().collect();
        if fields.len() != columns {
            return Err(ObservationError::ColumnCount { line, expected: columns, found: fields.len() });
        }

        for (column, field) in out.iter_mut().zip(&fields) {
            let value = field
                .parse::<f64>()
                .map_err(|_| ObservationError::Malformed { line, value: field.to_string() })?;
            column.push(value);
        }
    }

    if out.first().is_none_or(|c| c.is_empty()) {
        return Err(ObservationError::Empty);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_two_columns_skipping_comments() {
        let text = "# hjd rv\n2450000.1  -12.5\n\n2450000.2\t14.0 # peak\n";
        let cols = parse_columns(text, 2).unwrap();
        assert_eq!(cols, vec![vec![2450000.1, 2450000.2], vec![-12.5, 14.0]]);
    }

    #[test]
    fn column_count_mismatch_is_reported_with_line() {
        let err = parse_columns("0.1 2.0 0.5\n0.2 3.0\n", 3).unwrap_err();
        assert!(matches!(err, ObservationError::ColumnCount { line: 2, expected: 3, found: 2 }));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let err = parse_columns("0.1 abc\n", 2).unwrap_err();
        assert!(matches!(err, ObservationError::Malformed { line: 1, .. }));
    }

    #[test]
    fn comment_only_file_is_empty() {
        assert!(matches!(parse_columns("# nothing\n", 2), Err(ObservationError::Empty)));
    }

    #[test]
    fn text_loader_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0.00 10.0 1.5").unwrap();
        writeln!(file, "0.50 -10.0 1.0").unwrap();

        let cols = TextColumnLoader.load(file.path(), 3).unwrap();
        assert_eq!(cols[2], vec![1.5, 1.0]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TextColumnLoader.load(Path::new("/nonexistent/rv.dat"), 2).unwrap_err();
        assert!(matches!(err, ObservationError::Io(_)));
    }
}
