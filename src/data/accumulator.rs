use super::error::{LogError, Result};
use super::infer::{parse_float, ColumnKind};

// ---------------------------------------------------------------------------
// Accumulator – one column's time series
// ---------------------------------------------------------------------------

/// Per-column series, variant fixed at inference time.
///
/// Samples are kept in row order. Rows where the column's cell is empty add
/// nothing, so series of different columns may have different lengths.
#[derive(Debug, Clone, PartialEq)]
pub enum Accumulator {
    /// `(independent, value)` pairs.
    Scalar(Vec<(f64, f64)>),
    /// `(independent, values)` pairs. Element counts are not checked against
    /// each other.
    Array(Vec<(f64, Vec<f64>)>),
}

impl Accumulator {
    pub fn new(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Scalar => Accumulator::Scalar(Vec::new()),
            ColumnKind::Array => Accumulator::Array(Vec::new()),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Accumulator::Scalar(_) => ColumnKind::Scalar,
            Accumulator::Array(_) => ColumnKind::Array,
        }
    }

    /// Number of samples stored.
    pub fn len(&self) -> usize {
        match self {
            Accumulator::Scalar(samples) => samples.len(),
            Accumulator::Array(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse `raw` according to the variant and append it at `independent`.
    ///
    /// An empty `raw` is skipped. `column` is only used to name the column in
    /// a `ValueParse` error.
    pub fn add_cell(&mut self, column: &str, independent: f64, raw: &str) -> Result<()> {
        if raw.is_empty() {
            return Ok(());
        }
        let invalid = || LogError::ValueParse {
            column: column.to_string(),
            content: raw.to_string(),
        };

        match self {
            Accumulator::Scalar(samples) => {
                let value = parse_float(raw).ok_or_else(invalid)?;
                samples.push((independent, value));
            }
            Accumulator::Array(samples) => {
                let values = parse_array(raw).ok_or_else(invalid)?;
                samples.push((independent, values));
            }
        }
        Ok(())
    }

    pub fn scalar_samples(&self) -> Option<&[(f64, f64)]> {
        match self {
            Accumulator::Scalar(samples) => Some(samples),
            Accumulator::Array(_) => None,
        }
    }

    pub fn array_samples(&self) -> Option<&[(f64, Vec<f64>)]> {
        match self {
            Accumulator::Array(samples) => Some(samples),
            Accumulator::Scalar(_) => None,
        }
    }

    /// Widest array sample; 1 for scalar series.
    pub fn max_width(&self) -> usize {
        match self {
            Accumulator::Scalar(_) => 1,
            Accumulator::Array(samples) => samples.iter().map(|(_, v)| v.len()).max().unwrap_or(0),
        }
    }
}

/// `[a,b,c]` → `[a, b, c]`. The enclosing characters are dropped unchecked;
/// every token must be a float, so `[]` is invalid.
fn parse_array(raw: &str) -> Option<Vec<f64>> {
    let mut chars = raw.chars();
    chars.next()?;
    chars.next_back()?;
    chars.as_str().split(',').map(parse_float).collect()
}

// ---------------------------------------------------------------------------
// ColumnSeries – accumulator bound to its column
// ---------------------------------------------------------------------------

/// Receives finished series. Implemented by the plot layer.
pub trait SeriesRenderer {
    fn scalar(&mut self, name: &str, samples: &[(f64, f64)]);
    fn array(&mut self, name: &str, samples: &[(f64, Vec<f64>)]);
}

/// A data column: header name, position in the row, and its series.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSeries {
    pub name: String,
    /// Zero-based cell index; never 0, which is the independent variable.
    pub position: usize,
    pub accumulator: Accumulator,
}

impl ColumnSeries {
    pub fn new(name: &str, position: usize, accumulator: Accumulator) -> Self {
        ColumnSeries {
            name: name.to_string(),
            position,
            accumulator,
        }
    }

    /// Feed this column's cell from `row`.
    pub fn add_row(&mut self, independent: f64, row: &[String]) -> Result<()> {
        let raw = row.get(self.position).map(String::as_str).unwrap_or("");
        self.accumulator.add_cell(&self.name, independent, raw)
    }

    /// Hand the stored series to `target`.
    pub fn render(&self, target: &mut impl SeriesRenderer) {
        match &self.accumulator {
            Accumulator::Scalar(samples) => target.scalar(&self.name, samples),
            Accumulator::Array(samples) => target.array(&self.name, samples),
        }
    }
}
