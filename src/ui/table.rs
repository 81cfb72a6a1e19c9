use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::artifact::Table;

/// Plain striped table: index labels down the left, one column per field.
pub fn numeric_table(ui: &mut Ui, id: &str, table: &Table) {
    let corner = match &table.columns_name {
        Some(columns_name) => format!("{} \\ {columns_name}", table.index_name),
        None => table.index_name.clone(),
    };

    ui.push_id(id, |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .column(Column::auto().at_least(100.0))
                .columns(Column::auto().at_least(64.0), table.columns.len())
                .header(22.0, |mut header| {
                    header.col(|ui: &mut Ui| {
                        ui.strong(&corner);
                    });
                    for name in &table.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for (row_idx, label) in table.index.iter().enumerate() {
                        body.row(20.0, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.label(label);
                            });
                            for col_idx in 0..table.columns.len() {
                                row.col(|ui: &mut Ui| {
                                    ui.monospace(table.cell_text(row_idx, col_idx));
                                });
                            }
                        });
                    }
                });
        });
    });
}
