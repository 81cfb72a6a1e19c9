use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::artifact::{self, Artifact, PairCell, PairGrid, Table, XyChart};
use crate::color::{contrast_text, generate_palette, heat_color, ColorMap};
use crate::ui::table::numeric_table;

// ---------------------------------------------------------------------------
// Artifact dispatch
// ---------------------------------------------------------------------------

/// Render one computed artifact. `id` keeps widget ids unique per section.
pub fn render(ui: &mut Ui, id: &str, artifact: &Artifact) {
    match artifact {
        Artifact::Shape { rows, columns } => {
            ui.monospace(format!(
                "Number of Instances: {rows}\nNumber of Features: {columns}"
            ));
        }
        Artifact::Info(info) => {
            ui.monospace(info.to_string());
        }
        Artifact::Table(table) => numeric_table(ui, id, table),
        Artifact::Heatmap(table) => heatmap(ui, table),
        Artifact::PairGrid(grid) => pair_grid(ui, id, grid),
        Artifact::CountPlot(chart) => count_plot(ui, id, chart),
        Artifact::Line(chart) => xy_chart(ui, id, chart, XyStyle::Line),
        Artifact::Scatter(chart) => xy_chart(ui, id, chart, XyStyle::Points),
        Artifact::Pie(chart) => pie_chart(ui, chart),
    }
}

// ---------------------------------------------------------------------------
// Heat map (painter)
// ---------------------------------------------------------------------------

const HEATMAP_LABEL_WIDTH: f32 = 120.0;
const HEATMAP_HEADER_HEIGHT: f32 = 28.0;

/// Annotated heat-coloured grid of a table.
pub fn heatmap(ui: &mut Ui, table: &Table) {
    let n_rows = table.index.len();
    let n_cols = table.columns.len();
    if n_rows == 0 || n_cols == 0 {
        ui.label("Nothing to show.");
        return;
    }

    let cell = ((ui.available_width() - HEATMAP_LABEL_WIDTH) / n_cols as f32).clamp(32.0, 72.0);
    let size = Vec2::new(
        HEATMAP_LABEL_WIDTH + cell * n_cols as f32,
        HEATMAP_HEADER_HEIGHT + cell * n_rows as f32,
    );
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(12.0);
    let (lo, hi) = table.value_range().unwrap_or((0.0, 1.0));

    for (j, name) in table.columns.iter().enumerate() {
        let pos = origin
            + Vec2::new(
                HEATMAP_LABEL_WIDTH + cell * (j as f32 + 0.5),
                HEATMAP_HEADER_HEIGHT - 4.0,
            );
        painter.text(
            pos,
            Align2::CENTER_BOTTOM,
            truncate(name, 10),
            font.clone(),
            text_color,
        );
    }

    for (i, name) in table.index.iter().enumerate() {
        let top = HEATMAP_HEADER_HEIGHT + cell * i as f32;
        painter.text(
            origin + Vec2::new(HEATMAP_LABEL_WIDTH - 6.0, top + cell / 2.0),
            Align2::RIGHT_CENTER,
            truncate(name, 16),
            font.clone(),
            text_color,
        );
        for j in 0..n_cols {
            let rect = Rect::from_min_size(
                origin + Vec2::new(HEATMAP_LABEL_WIDTH + cell * j as f32, top),
                Vec2::splat(cell),
            );
            let fill = heat_color(table.values[i][j], lo, hi);
            painter.rect_filled(rect.shrink(1.0), 0.0, fill);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                table.cell_text(i, j),
                font.clone(),
                contrast_text(fill),
            );
        }
    }
}

fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_chars - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Count plot (horizontal bars)
// ---------------------------------------------------------------------------

pub fn count_plot(ui: &mut Ui, id: &str, chart: &artifact::BarChart) {
    let n = chart.bars.len();
    // first category on top
    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Bar::new((n - 1 - i) as f64, *count).name(label).width(0.7))
        .collect();
    let labels: Vec<String> = chart.bars.iter().rev().map(|(l, _)| l.clone()).collect();

    Plot::new(id)
        .height(60.0 + 26.0 * n as f32)
        .x_axis_label("count")
        .y_axis_label(chart.column.as_str())
        .y_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
                return String::new();
            }
            labels.get(pos as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .color(Color32::LIGHT_BLUE)
                    .name("Count Plot"),
            );
        });
}

// ---------------------------------------------------------------------------
// Line / scatter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XyStyle {
    Line,
    Points,
}

pub fn xy_chart(ui: &mut Ui, id: &str, chart: &XyChart, style: XyStyle) {
    let colors = ColorMap::new(chart.series.len());

    Plot::new(id)
        .legend(Legend::default())
        .height(380.0)
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let name = series
                    .label
                    .clone()
                    .unwrap_or_else(|| chart.y_label.clone());
                let color = colors.color_for(series.group);
                let points = PlotPoints::new(series.points.clone());

                match style {
                    XyStyle::Line => {
                        plot_ui.line(Line::new(points).name(&name).color(color).width(1.5))
                    }
                    XyStyle::Points => {
                        plot_ui.points(Points::new(points).name(&name).color(color).radius(2.5))
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Pair plot
// ---------------------------------------------------------------------------

pub fn pair_grid(ui: &mut Ui, id: &str, grid: &PairGrid) {
    let n = grid.columns.len();
    let colors = ColorMap::new(grid.groups.len());

    if let Some(hue) = &grid.hue {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.strong(hue);
            for (label, color) in colors.legend_entries(&grid.groups) {
                ui.colored_label(color, format!("● {label}"));
            }
        });
    }

    let cell = ((ui.available_width() - 24.0) / n as f32).clamp(120.0, 260.0);

    egui::Grid::new(id)
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for i in 0..n {
                for j in 0..n {
                    let mut plot = Plot::new(format!("{id}_{i}_{j}"))
                        .width(cell)
                        .height(cell)
                        .show_axes([i == n - 1, j == 0])
                        .allow_drag(false)
                        .allow_zoom(false)
                        .allow_scroll(false)
                        .allow_boxed_zoom(false);
                    if i == n - 1 {
                        plot = plot.x_axis_label(grid.columns[j].as_str());
                    }
                    if j == 0 {
                        plot = plot.y_axis_label(grid.columns[i].as_str());
                    }

                    plot.show(ui, |plot_ui| match &grid.cells[i][j] {
                        PairCell::Histogram { edges, groups } => {
                            if edges.len() < 2 {
                                return;
                            }
                            let width = edges[1] - edges[0];
                            for hist in groups {
                                let bars = hist
                                    .counts
                                    .iter()
                                    .enumerate()
                                    .map(|(b, &count)| {
                                        Bar::new((edges[b] + edges[b + 1]) / 2.0, count as f64)
                                            .width(width)
                                    })
                                    .collect();
                                plot_ui.bar_chart(
                                    BarChart::new(bars)
                                        .color(colors.color_for(hist.group).gamma_multiply(0.6)),
                                );
                            }
                        }
                        PairCell::Scatter(series) => {
                            for s in series {
                                plot_ui.points(
                                    Points::new(PlotPoints::new(s.points.clone()))
                                        .radius(1.5)
                                        .color(colors.color_for(s.group)),
                                );
                            }
                        }
                    });
                }
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart (painter)
// ---------------------------------------------------------------------------

const PIE_DIAMETER: f32 = 340.0;
const PIE_LEGEND_WIDTH: f32 = 220.0;

pub fn pie_chart(ui: &mut Ui, chart: &artifact::PieChart) {
    let palette = generate_palette(chart.slices.len());
    let (response, painter) = ui.allocate_painter(
        Vec2::new(PIE_DIAMETER + PIE_LEGEND_WIDTH, PIE_DIAMETER),
        Sense::hover(),
    );
    let center = response.rect.left_top() + Vec2::splat(PIE_DIAMETER / 2.0);
    let radius = PIE_DIAMETER * 0.45;
    let font = FontId::proportional(13.0);

    let mut start = -FRAC_PI_2;
    for (slice, &color) in chart.slices.iter().zip(&palette) {
        let sweep = slice.fraction as f32 * TAU;
        wedge(&painter, center, radius, start, sweep, color);

        let mid = start + sweep / 2.0;
        painter.text(
            center + Vec2::angled(mid) * radius * 0.62,
            Align2::CENTER_CENTER,
            &slice.percent_label,
            font.clone(),
            contrast_text(color),
        );
        start += sweep;
    }

    // legend
    let legend_origin = response.rect.left_top() + Vec2::new(PIE_DIAMETER + 12.0, 16.0);
    let text_color = ui.visuals().text_color();
    painter.text(
        legend_origin,
        Align2::LEFT_TOP,
        &chart.column,
        FontId::proportional(14.0),
        text_color,
    );
    for (i, (slice, &color)) in chart.slices.iter().zip(&palette).enumerate() {
        let row = legend_origin + Vec2::new(0.0, 24.0 + 20.0 * i as f32);
        painter.rect_filled(Rect::from_min_size(row, Vec2::splat(12.0)), 2.0, color);
        painter.text(
            row + Vec2::new(18.0, -1.0),
            Align2::LEFT_TOP,
            format!("{} ({})", truncate(&slice.label, 22), slice.count),
            font.clone(),
            text_color,
        );
    }
}

/// Filled circular sector, split into convex pieces of at most a quarter turn.
fn wedge(painter: &egui::Painter, center: egui::Pos2, radius: f32, start: f32, sweep: f32, color: Color32) {
    const SEGMENTS: usize = 16;
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;

    for p in 0..pieces {
        let from = start + step * p as f32;
        let mut points = Vec::with_capacity(SEGMENTS + 2);
        points.push(center);
        for k in 0..=SEGMENTS {
            let angle = from + step * k as f32 / SEGMENTS as f32;
            points.push(center + Vec2::angled(angle) * radius);
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }
    painter.line_segment(
        [center, center + Vec2::angled(start) * radius],
        Stroke::new(1.5, Color32::WHITE),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_truncated() {
        assert_eq!(truncate("Senior", 10), "Senior");
        assert_eq!(truncate("Machine Learning Engineer", 8), "Machine…");
    }
}
