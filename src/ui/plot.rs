use eframe::egui::{Color32, ScrollArea, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use telemetry_viewer::data::accumulator::SeriesRenderer;

use crate::color::SeriesColors;
use crate::state::ViewerState;

const MIN_PLOT_HEIGHT: f32 = 140.0;

// ---------------------------------------------------------------------------
// Series → lines
// ---------------------------------------------------------------------------

/// One polyline ready to hand to egui_plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLine {
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// Collects lines from column series: scalar columns become one line,
/// array columns one line per element index.
pub struct LineCollector<'a> {
    colors: &'a SeriesColors,
    pub lines: Vec<PlotLine>,
}

impl<'a> LineCollector<'a> {
    pub fn new(colors: &'a SeriesColors) -> Self {
        Self {
            colors,
            lines: Vec::new(),
        }
    }
}

impl SeriesRenderer for LineCollector<'_> {
    fn scalar(&mut self, name: &str, samples: &[(f64, f64)]) {
        self.lines.push(PlotLine {
            name: name.to_string(),
            color: self.colors.color_for(name, 0),
            points: samples.iter().map(|&(x, y)| [x, y]).collect(),
        });
    }

    fn array(&mut self, name: &str, samples: &[(f64, Vec<f64>)]) {
        let width = samples.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        for element in 0..width {
            // Rows shorter than `element + 1` just have no point here.
            let points = samples
                .iter()
                .filter_map(|(x, values)| values.get(element).map(|&y| [*x, y]))
                .collect();
            self.lines.push(PlotLine {
                name: format!("{name}[{element}]"),
                color: self.colors.color_for(name, element),
                points,
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Stack one plot per merge slot, x axes linked.
pub fn telemetry_plots(ui: &mut Ui, state: &ViewerState) {
    let log = match &state.log {
        Some(log) => log,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a telemetry log to plot it  (File → Open…)");
            });
            return;
        }
    };
    if state.slots.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!("No data columns ({} rows read)", log.rows));
        });
        return;
    }

    let height = (ui.available_height() / state.slots.len() as f32).max(MIN_PLOT_HEIGHT);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, slot) in state.slots.iter().enumerate() {
                let mut collector = LineCollector::new(&state.colors);
                for series in state.visible_series(slot) {
                    series.render(&mut collector);
                }

                Plot::new(("telemetry_plot", i))
                    .height(height)
                    .legend(Legend::default())
                    .x_axis_label(log.independent.clone())
                    .link_axis("telemetry_x", [true, false])
                    .allow_boxed_zoom(true)
                    .allow_drag(true)
                    .allow_scroll(false)
                    .allow_zoom(true)
                    .show(ui, |plot_ui| {
                        for line in collector.lines {
                            let points: PlotPoints = line.points.into_iter().collect();
                            plot_ui.line(
                                Line::new(points)
                                    .name(&line.name)
                                    .color(line.color)
                                    .width(1.5),
                            );
                        }
                    });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use telemetry_viewer::data::{ingest_reader, IngestOptions, MergeGroups};

    #[test]
    fn collects_scalar_and_array_lines() {
        let log = ingest_reader(
            "t,x,arr\n0,1.0,\"[1,2]\"\n1,,\"[3,4,9]\"\n2,3.0,\"[5,6]\"\n".as_bytes(),
            &IngestOptions::default(),
        )
        .unwrap();
        let slots = log.layout(&MergeGroups::from_specs(["x,arr"]));
        let colors = SeriesColors::new(&log, &slots);

        let mut collector = LineCollector::new(&colors);
        for series in &log.columns {
            series.render(&mut collector);
        }

        let names: Vec<_> = collector.lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["x", "arr[0]", "arr[1]", "arr[2]"]);
        assert_eq!(collector.lines[0].points, [[0.0, 1.0], [2.0, 3.0]]);
        assert_eq!(collector.lines[2].points, [[0.0, 2.0], [1.0, 4.0], [2.0, 6.0]]);
        assert_eq!(collector.lines[3].points, [[1.0, 9.0]]);
    }
}
