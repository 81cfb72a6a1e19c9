use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::chart::ChartKind;
use crate::state::AppState;
use crate::ui::panels::{column_combo, column_multiselect};
use crate::ui::plot;

/// Sections toggled from the overview grid, in display order.
const OVERVIEW_SECTIONS: [ChartKind; 6] = [
    ChartKind::Shape,
    ChartKind::Info,
    ChartKind::Describe,
    ChartKind::PairPlot,
    ChartKind::CorrelationHeatmap,
    ChartKind::Crosstab,
];

/// Charts configured from the side panel, drawn below the overview.
const SIDE_SECTIONS: [ChartKind; 4] = [
    ChartKind::CountPlot,
    ChartKind::LineChart,
    ChartKind::ScatterPlot,
    ChartKind::PieChart,
];

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Overview of the Dataset");

            if state.dataset.is_none() {
                ui.label("Open a file from the File menu or tick \"Use local dataset\".");
                return;
            }

            section_toggles(ui, state);
            ui.separator();

            for kind in OVERVIEW_SECTIONS {
                if !state.toggles.is_on(kind) {
                    continue;
                }
                ui.add_space(8.0);
                ui.heading(kind.title());
                section_selectors(ui, state, kind);
                show_outcome(ui, state, kind);
            }

            for kind in SIDE_SECTIONS {
                if !state.toggles.is_on(kind) {
                    continue;
                }
                ui.add_space(8.0);
                ui.heading(kind.title());
                show_outcome(ui, state, kind);
            }
        });
}

/// Three columns of two checkboxes each.
fn section_toggles(ui: &mut Ui, state: &mut AppState) {
    ui.columns(3, |columns| {
        for (i, pair) in OVERVIEW_SECTIONS.chunks(2).enumerate() {
            for &kind in pair {
                columns[i].checkbox(state.toggles.flag_mut(kind), kind.title());
            }
        }
    });
}

fn section_selectors(ui: &mut Ui, state: &mut AppState, kind: ChartKind) {
    let categorical = state.partition.categorical.clone();
    let numeric = state.partition.numeric.clone();
    let s = &mut state.selections;

    match kind {
        ChartKind::PairPlot => {
            column_multiselect(ui, "pair_cols", "Columns", &numeric, &mut s.pair_columns);
            ui.horizontal(|ui: &mut Ui| {
                column_combo(ui, "pair_hue", "Hue", &categorical, &mut s.pair_hue, true);
            });
        }
        ChartKind::CorrelationHeatmap => {
            column_multiselect(
                ui,
                "corr_cols",
                "Columns",
                &numeric,
                &mut s.correlation_columns,
            );
        }
        ChartKind::Crosstab => {
            ui.horizontal(|ui: &mut Ui| {
                column_combo(ui, "ct_index", "Index", &categorical, &mut s.crosstab_index, true);
                column_combo(ui, "ct_column", "Column", &categorical, &mut s.crosstab_column, true);
                ui.checkbox(&mut s.crosstab_heatmap, "Show as heatmap");
            });
        }
        _ => {}
    }
}

fn show_outcome(ui: &mut Ui, state: &mut AppState, kind: ChartKind) {
    let id = format!("section_{kind:?}");
    match state.outcome(kind) {
        Some(Ok(Some(artifact))) => plot::render(ui, &id, artifact),
        Some(Err(msg)) => {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        Some(Ok(None)) | None => {}
    }
}
