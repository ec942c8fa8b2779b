//! Streaming ingest of CSV telemetry logs.
//!
//! The [`data`] module holds the pipeline (row source → type inference →
//! per-column accumulators → merge grouping). [`transport`] is the live
//! packet/byte boundary used by the console binary; the pipeline does not
//! depend on it.

pub mod data;
pub mod transport;
