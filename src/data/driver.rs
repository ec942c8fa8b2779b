use std::fmt;
use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};

use super::accumulator::ColumnSeries;
use super::error::{LogError, Result};
use super::infer::{infer_columns, parse_float};
use super::merge::{MergeGroups, PlotSlot};
use super::options::IngestOptions;
use super::source::RowSource;

// ---------------------------------------------------------------------------
// TelemetryLog – the frozen result of a run
// ---------------------------------------------------------------------------

/// Every data column's series once the log has been read to the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryLog {
    /// Header of column 0.
    pub independent: String,
    /// Data columns in header order.
    pub columns: Vec<ColumnSeries>,
    /// Data rows fed to the accumulators (skipped rows excluded).
    pub rows: u64,
}

impl TelemetryLog {
    pub fn column(&self, name: &str) -> Option<&ColumnSeries> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Subplot layout for `groups`. Listed names missing from the log are
    /// logged and ignored.
    pub fn layout(&self, groups: &MergeGroups) -> Vec<PlotSlot> {
        for name in groups.unmatched(self.column_names()) {
            warn!("merge column '{name}' not present in the log");
        }
        groups.resolve(self.column_names())
    }
}

// ---------------------------------------------------------------------------
// StreamingDriver – header → inference → streaming
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    AwaitingHeader,
    InferringTypes,
    Streaming,
    Done,
    Failed,
}

impl DriverState {
    pub fn is_terminal(self) -> bool {
        matches!(self, DriverState::Done | DriverState::Failed)
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::AwaitingHeader => "awaiting header",
            DriverState::InferringTypes => "inferring types",
            DriverState::Streaming => "streaming",
            DriverState::Done => "done",
            DriverState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Pulls rows from a [`RowSource`] into per-column accumulators.
///
/// Any error moves the driver to [`DriverState::Failed`] and drops every
/// accumulated series.
pub struct StreamingDriver<R> {
    source: RowSource<R>,
    skip_data_rows: usize,
    progress_interval: u64,
    state: DriverState,
    header: Vec<String>,
    columns: Vec<ColumnSeries>,
    /// Row used for inference, fed first once streaming starts.
    inferred_row: Option<Vec<String>>,
    rows: u64,
}

impl<R: Read> StreamingDriver<R> {
    pub fn new(source: RowSource<R>, options: &IngestOptions) -> Self {
        StreamingDriver {
            source,
            skip_data_rows: options.skip_data_rows,
            progress_interval: options.progress_interval,
            state: DriverState::AwaitingHeader,
            header: Vec::new(),
            columns: Vec::new(),
            inferred_row: None,
            rows: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Rows fed to the accumulators so far.
    pub fn rows_processed(&self) -> u64 {
        self.rows
    }

    /// Series built so far; empty before inference and after a failure.
    pub fn columns(&self) -> &[ColumnSeries] {
        &self.columns
    }

    /// Advance by one transition, or by one row while streaming.
    pub fn step(&mut self) -> Result<DriverState> {
        match self.advance() {
            Ok(next) => {
                if next != self.state {
                    debug!("ingest: {} -> {next}", self.state);
                }
                self.state = next;
                Ok(next)
            }
            Err(e) => {
                debug!("ingest: {} -> {}", self.state, DriverState::Failed);
                self.state = DriverState::Failed;
                self.columns.clear();
                self.inferred_row = None;
                Err(e)
            }
        }
    }

    /// Read the log to the end.
    pub fn run(mut self) -> Result<TelemetryLog> {
        loop {
            match self.step()? {
                DriverState::Done => break,
                DriverState::Failed => return Err(LogError::Aborted),
                _ => {}
            }
        }
        Ok(TelemetryLog {
            independent: self.header.first().cloned().unwrap_or_default(),
            columns: self.columns,
            rows: self.rows,
        })
    }

    fn advance(&mut self) -> Result<DriverState> {
        match self.state {
            DriverState::AwaitingHeader => {
                self.header = self.source.header().to_vec();
                Ok(DriverState::InferringTypes)
            }
            DriverState::InferringTypes => {
                for _ in 0..self.skip_data_rows {
                    if self.source.next_row()?.is_none() {
                        return Ok(self.finish());
                    }
                }
                let Some(row) = self.source.next_row()? else {
                    return Ok(self.finish());
                };
                self.columns = infer_columns(&self.header, &row)?;
                self.inferred_row = Some(row);
                Ok(DriverState::Streaming)
            }
            DriverState::Streaming => {
                let row = match self.inferred_row.take() {
                    Some(row) => row,
                    None => match self.source.next_row()? {
                        Some(row) => row,
                        None => return Ok(self.finish()),
                    },
                };
                self.feed(&row)?;
                Ok(DriverState::Streaming)
            }
            DriverState::Done | DriverState::Failed => Ok(self.state),
        }
    }

    fn feed(&mut self, row: &[String]) -> Result<()> {
        let cell = row.first().map(String::as_str).unwrap_or("");
        let independent = parse_float(cell).ok_or_else(|| LogError::ValueParse {
            column: self.header.first().cloned().unwrap_or_default(),
            content: cell.to_string(),
        })?;

        for column in &mut self.columns {
            column.add_row(independent, row)?;
        }

        self.rows += 1;
        if self.progress_interval > 0 && self.rows % self.progress_interval == 0 {
            info!("working: parsed {} rows", self.rows);
        }
        Ok(())
    }

    fn finish(&self) -> DriverState {
        info!("finished: parsed {} rows", self.rows);
        DriverState::Done
    }
}

/// Open `path` and read it to the end.
pub fn ingest_path(path: &Path, options: &IngestOptions) -> Result<TelemetryLog> {
    let source = RowSource::from_path(path)?;
    StreamingDriver::new(source, options).run()
}

/// Read an in-memory or already-open log to the end.
pub fn ingest_reader<R: Read>(input: R, options: &IngestOptions) -> Result<TelemetryLog> {
    let source = RowSource::new(input)?;
    StreamingDriver::new(source, options).run()
}
