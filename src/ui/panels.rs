use eframe::egui::{self, Color32, ComboBox, RichText, ScrollArea, Ui};

use crate::chart::ChartKind;
use crate::data::loader::FileFormat;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Reusable column pickers
// ---------------------------------------------------------------------------

/// Label shown for "nothing chosen yet".
const NONE_SELECTED: &str = "<select>";

/// Single-column selectbox. With `allow_none` the first entry clears it.
pub fn column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[String],
    selected: &mut Option<String>,
    allow_none: bool,
) {
    ComboBox::from_id_salt(id)
        .selected_text(selected.as_deref().unwrap_or(NONE_SELECTED))
        .show_ui(ui, |ui: &mut Ui| {
            if allow_none {
                ui.selectable_value(selected, None, NONE_SELECTED);
            }
            for option in options {
                ui.selectable_value(selected, Some(option.clone()), option);
            }
        });
    ui.label(label);
}

/// Multi-column picker; keeps the order in which columns were ticked.
pub fn column_multiselect(
    ui: &mut Ui,
    id: &str,
    label: &str,
    options: &[String],
    selected: &mut Vec<String>,
) {
    let header = format!("{label}  ({}/{})", selected.len(), options.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(id)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = options.to_vec();
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for option in options {
                    let mut checked = selected.contains(option);
                    if ui.checkbox(&mut checked, option).changed() {
                        if checked {
                            selected.push(option.clone());
                        } else {
                            selected.retain(|s| s != option);
                        }
                    }
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Left side panel – visualization options
// ---------------------------------------------------------------------------

/// Render the left panel: intro text and the per-chart selectors.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Rusty EDA 👋");
    ui.label(
        "Get a quick insight into your data: open a CSV or Excel file, \
         or use the bundled salaries dataset.",
    );
    ui.separator();

    ui.heading("Data Visualization Options");
    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }
    if state.dataset.as_ref().is_some_and(|ds| ds.is_empty()) {
        ui.label(RichText::new("The dataset has no rows.").italics());
    }

    let categorical = state.partition.categorical.clone();
    let numeric = state.partition.numeric.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let s = &mut state.selections;

            ui.strong(ChartKind::CountPlot.title());
            ui.checkbox(&mut state.toggles.count_plot, "Draw Count Plot");
            if state.toggles.count_plot {
                column_combo(ui, "count_col", "Column", &categorical, &mut s.count_column, false);
            }
            ui.separator();

            ui.strong(ChartKind::LineChart.title());
            ui.checkbox(&mut state.toggles.line_chart, "Draw Line Chart");
            if state.toggles.line_chart {
                column_combo(ui, "line_x", "x-axis", &numeric, &mut s.line_x, false);
                column_combo(ui, "line_y", "y-axis", &numeric, &mut s.line_y, false);
                column_combo(ui, "line_hue", "Hue", &categorical, &mut s.line_hue, true);
            }
            ui.separator();

            ui.strong(ChartKind::ScatterPlot.title());
            ui.checkbox(&mut state.toggles.scatter_plot, "Draw Scatter Plot");
            if state.toggles.scatter_plot {
                column_combo(ui, "scatter_x", "x-axis", &numeric, &mut s.scatter_x, false);
                column_combo(ui, "scatter_y", "y-axis", &numeric, &mut s.scatter_y, false);
                column_combo(ui, "scatter_hue", "Hue", &categorical, &mut s.scatter_hue, true);
            }
            ui.separator();

            ui.strong(ChartKind::PieChart.title());
            ui.label(
                RichText::new(
                    "Same as the count plot, but only the 5 most frequent values \
                     and their ratios.",
                )
                .small(),
            );
            ui.checkbox(&mut state.toggles.pie_chart, "Draw Pie Chart");
            if state.toggles.pie_chart {
                column_combo(ui, "pie_col", "Column", &categorical, &mut s.pie_column, false);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label("File format:");
        for format in FileFormat::ALL {
            ui.radio_value(&mut state.format, format, format.to_string());
        }

        ui.separator();

        let mut use_local = state.use_local;
        if ui.checkbox(&mut use_local, "Use local dataset").changed() {
            state.set_use_local(use_local);
        }

        ui.separator();

        if let (Some(ds), Some(source)) = (&state.dataset, &state.source) {
            ui.label(format!(
                "{source}: {} rows, {} columns",
                ds.len(),
                ds.n_columns()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let all: Vec<&str> = FileFormat::ALL
        .iter()
        .flat_map(|f| f.extensions().iter().copied())
        .collect();
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", all.as_slice())
        .add_filter("CSV", FileFormat::Csv.extensions())
        .add_filter("Excel", FileFormat::Excel.extensions())
        .add_filter("Parquet", FileFormat::Parquet.extensions())
        .add_filter("JSON", FileFormat::Json.extensions())
        .pick_file();

    if let Some(path) = file {
        if let Ok(guessed) = FileFormat::from_path(&path) {
            if guessed != state.format {
                log::warn!(
                    "{} looks like {guessed} but will be parsed as {}",
                    path.display(),
                    state.format
                );
            }
        }
        let format = state.format;
        state.use_local = false;
        state.load_path(&path, format);
    }
}
