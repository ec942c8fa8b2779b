use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use telemetry_viewer::data::{ingest_path, ColumnSeries, IngestOptions, PlotSlot, TelemetryLog};

use crate::color::SeriesColors;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct ViewerState {
    /// Options every (re)load is run with.
    pub options: IngestOptions,

    /// File the current log came from.
    pub source_path: Option<PathBuf>,

    /// Frozen log (None until a file has been read).
    pub log: Option<TelemetryLog>,

    /// Subplots, resolved from the merge groups.
    pub slots: Vec<PlotSlot>,

    /// Columns the user switched off.
    pub hidden: BTreeSet<String>,

    pub colors: SeriesColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl ViewerState {
    pub fn new(options: IngestOptions) -> Self {
        Self {
            options,
            source_path: None,
            log: None,
            slots: Vec::new(),
            hidden: BTreeSet::new(),
            colors: SeriesColors::default(),
            status_message: None,
        }
    }

    /// Install a freshly read log and lay it out.
    pub fn set_log(&mut self, path: Option<PathBuf>, log: TelemetryLog) {
        self.slots = log.layout(&self.options.merge_groups());
        self.colors = SeriesColors::new(&log, &self.slots);
        self.hidden.clear();
        self.source_path = path;
        self.log = Some(log);
        self.status_message = None;
    }

    /// Read `path` with the current options. On failure the previous log
    /// stays on screen and the error goes to the status line; reporting it
    /// further is up to the caller.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let result = ingest_path(path, &self.options)
            .with_context(|| format!("reading {}", path.display()));
        match result {
            Ok(log) => {
                log::info!(
                    "loaded {} rows with columns {:?}",
                    log.rows,
                    log.column_names().collect::<Vec<_>>()
                );
                self.set_log(Some(path.to_path_buf()), log);
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e:#}"));
                Err(e)
            }
        }
    }

    pub fn is_visible(&self, column: &str) -> bool {
        !self.hidden.contains(column)
    }

    pub fn toggle_series(&mut self, column: &str) {
        if !self.hidden.remove(column) {
            self.hidden.insert(column.to_string());
        }
    }

    /// Show or hide every member of a subplot.
    pub fn set_slot_visible(&mut self, slot: usize, visible: bool) {
        let Some(slot) = self.slots.get(slot) else {
            return;
        };
        for name in &slot.members {
            if visible {
                self.hidden.remove(name);
            } else {
                self.hidden.insert(name.clone());
            }
        }
    }

    /// Visible series of a subplot, in header order.
    pub fn visible_series(&self, slot: &PlotSlot) -> Vec<&ColumnSeries> {
        let Some(log) = &self.log else {
            return Vec::new();
        };
        slot.members
            .iter()
            .filter(|name| self.is_visible(name))
            .filter_map(|name| log.column(name))
            .collect()
    }

    /// One line per subplot, for headless runs.
    pub fn layout_summary(&self) -> Vec<String> {
        let Some(log) = &self.log else {
            return Vec::new();
        };
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let members: Vec<String> = slot
                    .members
                    .iter()
                    .filter_map(|name| log.column(name))
                    .map(|c| {
                        format!(
                            "{} ({}, {} samples)",
                            c.name,
                            c.accumulator.kind().describe(),
                            c.accumulator.len()
                        )
                    })
                    .collect();
                format!("plot {}: {}", i + 1, members.join(", "))
            })
            .collect()
    }
}
