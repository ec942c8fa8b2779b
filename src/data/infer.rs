use log::info;

use super::accumulator::{Accumulator, ColumnSeries};
use super::error::{LogError, Result};

// ---------------------------------------------------------------------------
// Cell grammar
// ---------------------------------------------------------------------------

/// Representation chosen for a column from its first data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// One float per cell, drawn as a line.
    Scalar,
    /// `[a,b,…]` per cell, drawn as a waterfall.
    Array,
}

impl ColumnKind {
    pub fn describe(self) -> &'static str {
        match self {
            ColumnKind::Scalar => "numeric / line plot",
            ColumnKind::Array => "array / waterfall plot",
        }
    }
}

/// Parse a float the way log writers emit them; surrounding whitespace is
/// tolerated.
pub fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// True for a float cell. An empty cell also counts: a blank first-row cell
/// makes the column Scalar.
pub fn is_float(cell: &str) -> bool {
    cell.is_empty() || parse_float(cell).is_some()
}

/// True for a bracketed cell such as `[1,2,3]`. Inner tokens are not checked
/// until the cell is accumulated.
pub fn is_array(cell: &str) -> bool {
    cell.len() > 1 && cell.starts_with('[') && cell.ends_with(']')
}

/// Kind for a single cell. The float check runs before the array check.
pub fn infer_kind(cell: &str) -> Option<ColumnKind> {
    if is_float(cell) {
        Some(ColumnKind::Scalar)
    } else if is_array(cell) {
        Some(ColumnKind::Array)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Column inference
// ---------------------------------------------------------------------------

/// Build one empty accumulator per data column (every column but the first)
/// from the first data row.
///
/// Fails on the first cell that is neither a float nor an array; no
/// accumulators are returned in that case.
pub fn infer_columns(header: &[String], first_row: &[String]) -> Result<Vec<ColumnSeries>> {
    header
        .iter()
        .zip(first_row)
        .enumerate()
        .skip(1)
        .map(|(position, (name, cell))| {
            let kind = infer_kind(cell).ok_or_else(|| LogError::TypeInference {
                column: name.clone(),
                content: cell.clone(),
            })?;
            info!("detected {} for '{name}'", kind.describe());
            Ok(ColumnSeries::new(name, position, Accumulator::new(kind)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn numbers_are_scalar() {
        for cell in ["1", "-2.5", "1e-3", " 4.0 ", "nan", "inf"] {
            assert_eq!(infer_kind(cell), Some(ColumnKind::Scalar), "{cell}");
        }
    }

    #[test]
    fn bracketed_cells_are_array() {
        for cell in ["[1,2]", "[0.5]", "[a,b]", "[]"] {
            assert_eq!(infer_kind(cell), Some(ColumnKind::Array), "{cell}");
        }
    }

    // A blank first-row cell cannot tell us anything, but it still picks
    // Scalar. Logs whose array column starts blank then fail on the first
    // real array cell; keep it that way.
    #[test]
    fn empty_cell_defaults_to_scalar() {
        assert_eq!(infer_kind(""), Some(ColumnKind::Scalar));
    }

    #[test]
    fn other_cells_are_rejected() {
        for cell in ["abc", "[", "]", "[1,2", "1,2]", "true"] {
            assert_eq!(infer_kind(cell), None, "{cell}");
        }
    }

    #[test]
    fn infers_every_column_but_the_first() {
        let header = strings(&["t", "x", "arr", "blank"]);
        let row = strings(&["0", "1.0", "[1,2]", ""]);

        let columns = infer_columns(&header, &row).unwrap();
        let summary: Vec<_> = columns
            .iter()
            .map(|c| (c.name.as_str(), c.position, c.accumulator.kind()))
            .collect();
        assert_eq!(
            summary,
            [
                ("x", 1, ColumnKind::Scalar),
                ("arr", 2, ColumnKind::Array),
                ("blank", 3, ColumnKind::Scalar),
            ]
        );
        assert!(columns.iter().all(|c| c.accumulator.is_empty()));
    }

    #[test]
    fn independent_column_is_never_inspected() {
        let header = strings(&["time", "x"]);
        let row = strings(&["not-a-number", "1"]);
        assert_eq!(infer_columns(&header, &row).unwrap().len(), 1);
    }

    #[test]
    fn uninferrable_cell_names_column_and_content() {
        let header = strings(&["t", "x"]);
        let row = strings(&["0", "abc"]);

        match infer_columns(&header, &row) {
            Err(LogError::TypeInference { column, content }) => {
                assert_eq!(column, "x");
                assert_eq!(content, "abc");
            }
            other => panic!("expected TypeInference, got {other:?}"),
        }
    }
}
