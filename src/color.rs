use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use telemetry_viewer::data::{PlotSlot, TelemetryLog};

// ---------------------------------------------------------------------------
// Hue ramp
// ---------------------------------------------------------------------------

/// `n` colours with evenly spaced hues, starting at `offset` degrees.
pub fn hue_ramp(n: usize, offset: f32) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = offset + (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.7, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: one per drawn line
// ---------------------------------------------------------------------------

/// Colours for every line drawn, keyed by column name.
///
/// Lines are counted per subplot (an array column contributes one line per
/// element) so colours only need to be distinct within a subplot.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    lines: BTreeMap<String, Vec<Color32>>,
}

impl SeriesColors {
    pub fn new(log: &TelemetryLog, slots: &[PlotSlot]) -> Self {
        let mut lines = BTreeMap::new();
        for slot in slots {
            let widths: Vec<(&str, usize)> = slot
                .members
                .iter()
                .filter_map(|name| log.column(name))
                .map(|c| (c.name.as_str(), c.accumulator.max_width().max(1)))
                .collect();
            let total: usize = widths.iter().map(|(_, w)| w).sum();

            let mut ramp = hue_ramp(total, 210.0).into_iter();
            for (name, width) in widths {
                lines.insert(name.to_string(), ramp.by_ref().take(width).collect());
            }
        }
        SeriesColors { lines }
    }

    /// Colour of line `element` of column `name`; grey when unknown.
    pub fn color_for(&self, name: &str, element: usize) -> Color32 {
        self.lines
            .get(name)
            .and_then(|c| c.get(element))
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use telemetry_viewer::data::{ingest_reader, IngestOptions, MergeGroups};

    #[test]
    fn ramp_has_requested_length_and_distinct_colours() {
        let ramp = hue_ramp(6, 0.0);
        assert_eq!(ramp.len(), 6);
        for (i, a) in ramp.iter().enumerate() {
            for b in &ramp[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(hue_ramp(0, 0.0).is_empty());
    }

    #[test]
    fn array_columns_get_one_colour_per_element() {
        let log = ingest_reader(
            "t,x,arr\n0,1,\"[1,2,3]\"\n".as_bytes(),
            &IngestOptions::default(),
        )
        .unwrap();
        let slots = log.layout(&MergeGroups::from_specs(["x,arr"]));
        let colors = SeriesColors::new(&log, &slots);

        let all = [
            colors.color_for("x", 0),
            colors.color_for("arr", 0),
            colors.color_for("arr", 1),
            colors.color_for("arr", 2),
        ];
        assert!(all.iter().all(|c| *c != Color32::GRAY));
        assert_eq!(colors.color_for("arr", 3), Color32::GRAY);
        assert_eq!(colors.color_for("missing", 0), Color32::GRAY);
    }
}
