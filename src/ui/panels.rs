use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – series per subplot
// ---------------------------------------------------------------------------

/// Render the left panel: one collapsible section per subplot with a
/// visibility checkbox per column.
pub fn side_panel(ui: &mut Ui, state: &mut ViewerState) {
    ui.heading("Series");
    ui.separator();

    let Some(log) = &state.log else {
        ui.label("No log loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let slots = state.slots.clone();
    let kinds: Vec<Vec<(String, &'static str, usize)>> = slots
        .iter()
        .map(|slot| {
            slot.members
                .iter()
                .filter_map(|name| log.column(name))
                .map(|c| {
                    (
                        c.name.clone(),
                        c.accumulator.kind().describe(),
                        c.accumulator.len(),
                    )
                })
                .collect()
        })
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, members) in kinds.iter().enumerate() {
                let n_visible = members
                    .iter()
                    .filter(|(name, _, _)| state.is_visible(name))
                    .count();
                let header_text = format!("Plot {}  ({n_visible}/{})", i + 1, members.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(("slot", i))
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.set_slot_visible(i, true);
                            }
                            if ui.small_button("None").clicked() {
                                state.set_slot_visible(i, false);
                            }
                        });

                        for (name, kind, samples) in members {
                            let text = RichText::new(name).color(state.colors.color_for(name, 0));
                            let mut checked = state.is_visible(name);
                            if ui
                                .checkbox(&mut checked, text)
                                .on_hover_text(format!("{kind}, {samples} samples"))
                                .changed()
                            {
                                state.toggle_series(name);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(log) = &state.log {
            if let Some(path) = &state.source_path {
                ui.label(path.display().to_string());
                ui.separator();
            }
            ui.label(format!(
                "{} rows, {} columns, {} plots",
                log.rows,
                log.columns.len(),
                state.slots.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Ask for a telemetry log; `None` if the dialog was cancelled.
pub fn pick_log_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open telemetry log")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file()
}

pub fn open_file_dialog(state: &mut ViewerState) {
    if let Some(path) = pick_log_file() {
        if let Err(e) = state.load(&path) {
            log::error!("failed to load log: {e:#}");
        }
    }
}
