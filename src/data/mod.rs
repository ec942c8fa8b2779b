//! Data layer: row streaming, type inference, accumulation and merge grouping.
//!
//! Architecture:
//! ```text
//!   telemetry .csv
//!        │
//!        ▼
//!   ┌───────────┐
//!   │  source   │  header once, then one row at a time
//!   └───────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │   infer   │  first data row → Scalar / Array per column
//!   └───────────┘
//!        │
//!        ▼
//!   ┌─────────────┐
//!   │ accumulator │  (independent, value) series per column
//!   └─────────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │   merge   │  --merge groups → plot slots
//!   └───────────┘
//! ```
//!
//! [`driver`] runs the first three stages; the caller resolves the merge
//! layout once the log is frozen.

pub mod accumulator;
pub mod driver;
pub mod error;
pub mod infer;
pub mod merge;
pub mod options;
pub mod source;

pub use accumulator::{Accumulator, ColumnSeries};
pub use driver::{ingest_path, ingest_reader, DriverState, StreamingDriver, TelemetryLog};
pub use error::{LogError, Result};
pub use merge::{MergeGroups, PlotSlot};
pub use options::IngestOptions;
pub use source::RowSource;
