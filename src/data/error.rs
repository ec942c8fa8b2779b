use thiserror::Error;

pub type Result<T, E = LogError> = std::result::Result<T, E>;

/// Everything that can abort ingesting a telemetry log.
///
/// None of these are recovered at the row level: a log whose rows disagree
/// with the header or with the column kinds chosen at inference is corrupt.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("row at line {line} has {found} cells but the header has {expected}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("unable to infer data type for '{column}' from data contents '{content}'")]
    TypeInference { column: String, content: String },

    #[error("column '{column}': cannot parse '{content}' as a value of the inferred type")]
    ValueParse { column: String, content: String },

    #[error("ingest already failed")]
    Aborted,

    #[error("reading CSV")]
    Csv(#[from] csv::Error),

    #[error("opening telemetry log")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// Column name the error is attributed to, when there is one.
    pub fn column(&self) -> Option<&str> {
        match self {
            LogError::TypeInference { column, .. } | LogError::ValueParse { column, .. } => {
                Some(column.as_str())
            }
            _ => None,
        }
    }
}
