use super::merge::MergeGroups;

/// How a telemetry log is read and laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Data rows discarded right after the header, before type inference.
    pub skip_data_rows: usize,
    /// `--merge` specifications, each a comma-separated list of column names.
    pub merge: Vec<String>,
    /// Emit a progress line every this many rows; 0 disables it.
    pub progress_interval: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            skip_data_rows: 0,
            merge: Vec::new(),
            progress_interval: 1000,
        }
    }
}

impl IngestOptions {
    pub fn merge_groups(&self) -> MergeGroups {
        MergeGroups::from_specs(&self.merge)
    }
}
