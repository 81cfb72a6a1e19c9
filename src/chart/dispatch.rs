use std::collections::HashMap;

use super::artifact::{
    Artifact, BarChart, Histogram, NumberFormat, PairCell, PairGrid, PieChart, PieSlice, Series,
    Table, XyChart,
};
use super::request::{ChartRequest, CrosstabDisplay};
use crate::config::{COUNT_PLOT_TOP_N, HISTOGRAM_BINS, PIE_CHART_TOP_N};
use crate::data::model::{CellValue, ColumnKind, DType, Dataset};
use crate::data::stats;
use crate::error::{EdaError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Compute the artifact for one request.
///
/// `Ok(None)` means there is intentionally nothing to draw yet: an empty
/// correlation selection, or a crosstab axis that has not been chosen.
pub fn dispatch(dataset: &Dataset, request: &ChartRequest) -> Result<Option<Artifact>> {
    let artifact = match request {
        ChartRequest::Shape => Artifact::Shape {
            rows: dataset.len(),
            columns: dataset.n_columns(),
        },
        ChartRequest::Info => Artifact::Info(stats::info(dataset)),
        ChartRequest::Describe => Artifact::Table(describe_table(dataset)?),
        ChartRequest::PairPlot { columns, hue } => {
            Artifact::PairGrid(pair_grid(dataset, columns, hue.as_deref())?)
        }
        ChartRequest::CorrelationHeatmap { columns } => {
            if columns.is_empty() {
                return Ok(None);
            }
            Artifact::Heatmap(correlation_table(dataset, columns)?)
        }
        ChartRequest::Crosstab {
            index,
            column,
            display,
        } => {
            let (Some(index), Some(column)) = (index, column) else {
                return Ok(None);
            };
            let table = crosstab_table(dataset, index, column)?;
            match display {
                CrosstabDisplay::Table => Artifact::Table(table),
                CrosstabDisplay::Heatmap => Artifact::Heatmap(table),
            }
        }
        ChartRequest::CountPlot { column } => {
            Artifact::CountPlot(count_plot(dataset, selected(column, "count plot column")?)?)
        }
        ChartRequest::LineChart { x, y, hue } => {
            let chart = xy_chart(
                dataset,
                selected(x, "x-axis")?,
                selected(y, "y-axis")?,
                hue.as_deref(),
            )?;
            Artifact::Line(average_by_x(chart))
        }
        ChartRequest::ScatterPlot { x, y, hue } => Artifact::Scatter(xy_chart(
            dataset,
            selected(x, "x-axis")?,
            selected(y, "y-axis")?,
            hue.as_deref(),
        )?),
        ChartRequest::PieChart { column } => {
            Artifact::Pie(pie_chart(dataset, selected(column, "pie chart column")?)?)
        }
    };
    Ok(Some(artifact))
}

// ---------------------------------------------------------------------------
// Selection validation
// ---------------------------------------------------------------------------

fn selected<'a>(name: &'a Option<String>, role: &str) -> Result<&'a str> {
    name.as_deref()
        .ok_or_else(|| EdaError::invalid_selection(format!("no column selected for {role}")))
}

/// Position of `name`, which must exist and be of `kind`.
fn resolve(dataset: &Dataset, name: &str, kind: ColumnKind) -> Result<usize> {
    let (idx, column) = dataset
        .column(name)
        .ok_or_else(|| EdaError::invalid_selection(format!("column '{name}' not found")))?;
    if column.kind() != kind {
        return Err(EdaError::invalid_selection(format!(
            "column '{name}' is {}, expected a {kind} column",
            column.kind()
        )));
    }
    Ok(idx)
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Summary statistics of the int and float columns, one row per column.
///
/// Bool columns count as numeric elsewhere but are left out here. A dataset
/// without int or float columns is an `InvalidSelection`; there is no
/// count/unique/top/freq summary of text columns.
fn describe_table(dataset: &Dataset) -> Result<Table> {
    let numeric: Vec<usize> = dataset
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind() == ColumnKind::Numeric && c.dtype != DType::Bool)
        .map(|(idx, _)| idx)
        .collect();
    if numeric.is_empty() {
        return Err(EdaError::invalid_selection(
            "dataset has no numeric columns to describe",
        ));
    }

    let summaries = stats::describe(dataset, &numeric);
    Ok(Table {
        index_name: String::new(),
        columns_name: None,
        index: summaries.iter().map(|(name, _)| name.clone()).collect(),
        columns: stats::Summary::LABELS.iter().map(|l| l.to_string()).collect(),
        values: summaries.iter().map(|(_, s)| s.values().to_vec()).collect(),
        format: NumberFormat::Fixed(4),
    })
}

fn correlation_table(dataset: &Dataset, columns: &[String]) -> Result<Table> {
    let indices = columns
        .iter()
        .map(|name| resolve(dataset, name, ColumnKind::Numeric))
        .collect::<Result<Vec<usize>>>()?;

    Ok(Table {
        index_name: String::new(),
        columns_name: None,
        index: columns.to_vec(),
        columns: columns.to_vec(),
        values: stats::correlation_matrix(dataset, &indices),
        format: NumberFormat::Fixed(2),
    })
}

fn crosstab_table(dataset: &Dataset, index: &str, column: &str) -> Result<Table> {
    let index_idx = resolve(dataset, index, ColumnKind::Categorical)?;
    let column_idx = resolve(dataset, column, ColumnKind::Categorical)?;
    let ct = stats::crosstab(dataset, index_idx, column_idx);
    log::debug!(
        "crosstab {index} x {column}: {}x{} cells over {} rows",
        ct.index.len(),
        ct.columns.len(),
        ct.total()
    );

    Ok(Table {
        index_name: index.to_string(),
        columns_name: Some(column.to_string()),
        index: ct.index.iter().map(CellValue::to_string).collect(),
        columns: ct.columns.iter().map(CellValue::to_string).collect(),
        values: ct
            .counts
            .iter()
            .map(|row| row.iter().map(|&n| n as f64).collect())
            .collect(),
        format: NumberFormat::Integer,
    })
}

// ---------------------------------------------------------------------------
// Frequency charts
// ---------------------------------------------------------------------------

fn top_values(dataset: &Dataset, column: &str, n: usize) -> Result<Vec<(CellValue, usize)>> {
    let idx = resolve(dataset, column, ColumnKind::Categorical)?;
    let top = stats::top_n(dataset.cells(idx), n);
    if top.is_empty() {
        return Err(EdaError::invalid_selection(format!(
            "column '{column}' has no values"
        )));
    }
    Ok(top)
}

fn count_plot(dataset: &Dataset, column: &str) -> Result<BarChart> {
    let bars = top_values(dataset, column, COUNT_PLOT_TOP_N)?
        .into_iter()
        .map(|(value, count)| (value.to_string(), count as f64))
        .collect();
    Ok(BarChart {
        column: column.to_string(),
        bars,
    })
}

fn pie_chart(dataset: &Dataset, column: &str) -> Result<PieChart> {
    let top = top_values(dataset, column, PIE_CHART_TOP_N)?;
    let total: usize = top.iter().map(|(_, n)| n).sum();

    let slices = top
        .into_iter()
        .map(|(value, count)| {
            let fraction = count as f64 / total as f64;
            PieSlice {
                label: value.to_string(),
                count,
                fraction,
                percent_label: format!("{:.2}%", fraction * 100.0),
            }
        })
        .collect();
    Ok(PieChart {
        column: column.to_string(),
        slices,
    })
}

// ---------------------------------------------------------------------------
// Hue grouping
// ---------------------------------------------------------------------------

/// Row → hue group assignment, groups in first-seen order.
struct HueGroups {
    labels: Vec<Option<String>>,
    /// `None` for rows dropped because their hue is missing.
    of_row: Vec<Option<usize>>,
}

impl HueGroups {
    fn new(dataset: &Dataset, hue: Option<usize>) -> Self {
        let Some(hue) = hue else {
            return HueGroups {
                labels: vec![None],
                of_row: vec![Some(0); dataset.len()],
            };
        };

        let mut slots: HashMap<&CellValue, usize> = HashMap::new();
        let mut labels = Vec::new();
        let of_row = dataset
            .cells(hue)
            .map(|cell| {
                if cell.is_null() {
                    return None;
                }
                let slot = *slots.entry(cell).or_insert_with(|| {
                    labels.push(Some(cell.to_string()));
                    labels.len() - 1
                });
                Some(slot)
            })
            .collect();
        HueGroups { labels, of_row }
    }

    /// Split `(row, point)` pairs into one series per group.
    fn series(&self, points: impl Iterator<Item = (usize, [f64; 2])>) -> Vec<Series> {
        let mut series: Vec<Series> = self
            .labels
            .iter()
            .enumerate()
            .map(|(group, label)| Series {
                group,
                label: label.clone(),
                points: Vec::new(),
            })
            .collect();
        for (row, point) in points {
            if let Some(group) = self.of_row[row] {
                series[group].points.push(point);
            }
        }
        series
    }
}

fn resolve_hue(dataset: &Dataset, hue: Option<&str>) -> Result<Option<usize>> {
    hue.map(|name| resolve(dataset, name, ColumnKind::Categorical))
        .transpose()
}

/// Rows where both values are present, as `(row, [x, y])`.
fn complete_pairs<'a>(
    xs: &'a [Option<f64>],
    ys: &'a [Option<f64>],
) -> impl Iterator<Item = (usize, [f64; 2])> + 'a {
    xs.iter()
        .zip(ys)
        .enumerate()
        .filter_map(|(row, (x, y))| Some((row, [(*x)?, (*y)?])))
        .filter(|(_, [x, y])| !x.is_nan() && !y.is_nan())
}

// ---------------------------------------------------------------------------
// Line / scatter
// ---------------------------------------------------------------------------

fn xy_chart(dataset: &Dataset, x: &str, y: &str, hue: Option<&str>) -> Result<XyChart> {
    let x_idx = resolve(dataset, x, ColumnKind::Numeric)?;
    let y_idx = resolve(dataset, y, ColumnKind::Numeric)?;
    let groups = HueGroups::new(dataset, resolve_hue(dataset, hue)?);

    let xs = dataset.numeric_values(x_idx);
    let ys = dataset.numeric_values(y_idx);
    Ok(XyChart {
        x_label: x.to_string(),
        y_label: y.to_string(),
        hue: hue.map(str::to_string),
        series: groups.series(complete_pairs(&xs, &ys)),
    })
}

/// Per series: mean y for each distinct x, sorted by x.
fn average_by_x(mut chart: XyChart) -> XyChart {
    for series in &mut chart.series {
        let mut points = std::mem::take(&mut series.points);
        points.sort_by(|a, b| a[0].total_cmp(&b[0]));

        let mut averaged: Vec<[f64; 2]> = Vec::with_capacity(points.len());
        let mut run: Option<(f64, f64, usize)> = None;
        for [x, y] in points {
            run = match run {
                Some((rx, sum, n)) if rx == x => Some((rx, sum + y, n + 1)),
                Some((rx, sum, n)) => {
                    averaged.push([rx, sum / n as f64]);
                    Some((x, y, 1))
                }
                None => Some((x, y, 1)),
            };
        }
        if let Some((rx, sum, n)) = run {
            averaged.push([rx, sum / n as f64]);
        }
        series.points = averaged;
    }
    chart
}

// ---------------------------------------------------------------------------
// Pair plot
// ---------------------------------------------------------------------------

fn pair_grid(dataset: &Dataset, columns: &[String], hue: Option<&str>) -> Result<PairGrid> {
    if columns.is_empty() {
        return Err(EdaError::invalid_selection(
            "select at least one numeric column for the pair plot",
        ));
    }
    let indices = columns
        .iter()
        .map(|name| resolve(dataset, name, ColumnKind::Numeric))
        .collect::<Result<Vec<usize>>>()?;
    let groups = HueGroups::new(dataset, resolve_hue(dataset, hue)?);
    let series: Vec<Vec<Option<f64>>> = indices
        .iter()
        .map(|&idx| dataset.numeric_values(idx))
        .collect();

    let cells = (0..indices.len())
        .map(|i| {
            (0..indices.len())
                .map(|j| {
                    if i == j {
                        histogram_cell(&series[i], &groups)
                    } else {
                        PairCell::Scatter(groups.series(complete_pairs(&series[j], &series[i])))
                    }
                })
                .collect()
        })
        .collect();

    Ok(PairGrid {
        columns: columns.to_vec(),
        hue: hue.map(str::to_string),
        groups: groups.labels.iter().flatten().cloned().collect(),
        cells,
    })
}

fn histogram_cell(values: &[Option<f64>], groups: &HueGroups) -> PairCell {
    let present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(row, v)| Some((row, (*v)?)))
        .filter(|(row, v)| !v.is_nan() && groups.of_row[*row].is_some())
        .collect();

    let edges = histogram_edges(present.iter().map(|(_, v)| *v), HISTOGRAM_BINS);
    let mut hists: Vec<Histogram> = groups
        .labels
        .iter()
        .enumerate()
        .map(|(group, label)| Histogram {
            group,
            label: label.clone(),
            counts: vec![0; edges.len().saturating_sub(1)],
        })
        .collect();

    for (row, v) in present {
        if let (Some(group), Some(bin)) = (groups.of_row[row], bin_of(&edges, v)) {
            hists[group].counts[bin] += 1;
        }
    }

    PairCell::Histogram {
        edges,
        groups: hists,
    }
}

/// `bins + 1` equal-width edges over the value range; empty for no values.
fn histogram_edges(values: impl Iterator<Item = f64>, bins: usize) -> Vec<f64> {
    let Some((lo, hi)) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return Vec::new();
    };
    let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
    let width = (hi - lo) / bins as f64;
    (0..=bins).map(|i| lo + width * i as f64).collect()
}

/// Bin index of `v`; the last bin is closed on the right.
fn bin_of(edges: &[f64], v: f64) -> Option<usize> {
    let bins = edges.len().checked_sub(1).filter(|&b| b > 0)?;
    let (lo, hi) = (edges[0], edges[bins]);
    if v < lo || v > hi {
        return None;
    }
    let pos = ((v - lo) / (hi - lo) * bins as f64) as usize;
    Some(pos.min(bins - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::request::ChartKind;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    /// title, level, salary, year
    fn salaries() -> Dataset {
        let rows = [
            ("DS", "SE", 100, 2020),
            ("DS", "EN", 60, 2021),
            ("MLE", "SE", 150, 2021),
            ("DA", "MI", 80, 2022),
            ("DS", "SE", 120, 2022),
            ("MLE", "MI", 110, 2022),
        ]
        .into_iter()
        .map(|(t, l, sal, y)| {
            vec![
                s(t),
                s(l),
                CellValue::Integer(sal),
                CellValue::Integer(y),
            ]
        })
        .collect();
        Dataset::from_rows(
            vec![
                "title".into(),
                "level".into(),
                "salary".into(),
                "year".into(),
            ],
            rows,
        )
    }

    fn name(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn shape_reports_rows_and_columns() {
        let artifact = dispatch(&salaries(), &ChartRequest::Shape).unwrap();
        assert_eq!(
            artifact,
            Some(Artifact::Shape {
                rows: 6,
                columns: 4
            })
        );
    }

    #[test]
    fn describe_transposes_numeric_columns() {
        let ds = Dataset::from_rows(
            vec!["v".into(), "label".into()],
            vec![
                vec![CellValue::Integer(1), s("a")],
                vec![CellValue::Integer(2), s("b")],
                vec![CellValue::Integer(3), s("c")],
            ],
        );
        let Some(Artifact::Table(table)) = dispatch(&ds, &ChartRequest::Describe).unwrap() else {
            panic!("expected a table");
        };
        assert_eq!(table.index, vec!["v"]);
        assert_eq!(table.columns[0], "count");
        let row = &table.values[0];
        assert_eq!(row[0], 3.0);
        assert_eq!(row[1], 2.0);
        assert_eq!(row[3], 1.0);
        assert_eq!(row[7], 3.0);
    }

    #[test]
    fn describe_leaves_out_bool_columns() {
        let ds = Dataset::from_rows(
            vec!["v".into(), "flag".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Bool(true)],
                vec![CellValue::Integer(2), CellValue::Bool(false)],
            ],
        );
        let Some(Artifact::Table(table)) = dispatch(&ds, &ChartRequest::Describe).unwrap() else {
            panic!("expected a table");
        };
        assert_eq!(table.index, vec!["v"]);
        // still numeric for the chart selectors
        assert_eq!(ds.columns()[1].kind(), ColumnKind::Numeric);
    }

    #[test]
    fn describe_without_numeric_columns_is_invalid() {
        let ds = Dataset::from_rows(vec!["t".into()], vec![vec![s("x")]]);
        let err = dispatch(&ds, &ChartRequest::Describe).unwrap_err();
        assert!(matches!(err, EdaError::InvalidSelection { .. }));
    }

    #[test]
    fn empty_correlation_selection_draws_nothing() {
        let request = ChartRequest::CorrelationHeatmap { columns: vec![] };
        assert_eq!(dispatch(&salaries(), &request).unwrap(), None);
    }

    #[test]
    fn correlation_heatmap_is_square() {
        let request = ChartRequest::CorrelationHeatmap {
            columns: vec!["salary".into(), "year".into()],
        };
        let Some(Artifact::Heatmap(table)) = dispatch(&salaries(), &request).unwrap() else {
            panic!("expected a heatmap");
        };
        assert_eq!(table.values.len(), 2);
        assert_eq!(table.cell_text(0, 0), "1.00");
    }

    #[test]
    fn correlation_of_text_column_is_invalid() {
        let request = ChartRequest::CorrelationHeatmap {
            columns: vec!["salary".into(), "title".into()],
        };
        let err = dispatch(&salaries(), &request).unwrap_err();
        assert!(matches!(err, EdaError::InvalidSelection { .. }));
    }

    #[test]
    fn crosstab_waits_for_both_axes() {
        for (index, column) in [(None, name("level")), (name("title"), None), (None, None)] {
            let request = ChartRequest::Crosstab {
                index,
                column,
                display: CrosstabDisplay::Table,
            };
            assert_eq!(dispatch(&salaries(), &request).unwrap(), None);
        }
    }

    #[test]
    fn crosstab_cells_sum_to_row_count() {
        let ds = salaries();
        let request = ChartRequest::Crosstab {
            index: name("title"),
            column: name("level"),
            display: CrosstabDisplay::Heatmap,
        };
        let Some(Artifact::Heatmap(table)) = dispatch(&ds, &request).unwrap() else {
            panic!("expected a heatmap");
        };
        let total: f64 = table.values.iter().flatten().sum();
        assert_eq!(total as usize, ds.len());
        assert_eq!(table.index, vec!["DA", "DS", "MLE"]);
        assert_eq!(table.cell_text(1, 2), "2");
    }

    #[test]
    fn crosstab_of_numeric_column_is_invalid() {
        let request = ChartRequest::Crosstab {
            index: name("title"),
            column: name("salary"),
            display: CrosstabDisplay::Table,
        };
        assert!(dispatch(&salaries(), &request).is_err());
    }

    #[test]
    fn count_plot_keeps_top_fifteen() {
        let rows: Vec<Vec<CellValue>> = (0..20)
            .flat_map(|i| std::iter::repeat(vec![s(&format!("c{i:02}"))]).take(20 - i))
            .collect();
        let ds = Dataset::from_rows(vec!["cat".into()], rows);
        let request = ChartRequest::CountPlot {
            column: name("cat"),
        };
        let Some(Artifact::CountPlot(chart)) = dispatch(&ds, &request).unwrap() else {
            panic!("expected a count plot");
        };
        assert_eq!(chart.bars.len(), COUNT_PLOT_TOP_N);
        assert_eq!(chart.bars[0], ("c00".to_string(), 20.0));
        assert_eq!(chart.bars[14].0, "c14");
    }

    #[test]
    fn count_plot_without_column_is_invalid() {
        let request = ChartRequest::CountPlot { column: None };
        let err = dispatch(&salaries(), &request).unwrap_err();
        assert!(matches!(err, EdaError::InvalidSelection { .. }));
    }

    #[test]
    fn pie_labels_are_two_decimal_percentages() {
        let rows: Vec<Vec<CellValue>> = std::iter::repeat(vec![s("A")])
            .take(6)
            .chain(std::iter::repeat(vec![s("B")]).take(4))
            .collect();
        let ds = Dataset::from_rows(vec!["grade".into()], rows);
        let request = ChartRequest::PieChart {
            column: name("grade"),
        };
        let Some(Artifact::Pie(pie)) = dispatch(&ds, &request).unwrap() else {
            panic!("expected a pie chart");
        };
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.percent_label.as_str()).collect();
        assert_eq!(labels, vec!["60.00%", "40.00%"]);
    }

    #[test]
    fn pie_keeps_top_five() {
        let rows: Vec<Vec<CellValue>> = (0..8).map(|i| vec![s(&format!("v{i}"))]).collect();
        let ds = Dataset::from_rows(vec!["v".into()], rows);
        let request = ChartRequest::PieChart { column: name("v") };
        let Some(Artifact::Pie(pie)) = dispatch(&ds, &request).unwrap() else {
            panic!("expected a pie chart");
        };
        assert_eq!(pie.slices.len(), PIE_CHART_TOP_N);
        assert_eq!(pie.slices[0].percent_label, "20.00%");
    }

    #[test]
    fn line_chart_averages_duplicate_x_in_order() {
        let request = ChartRequest::LineChart {
            x: name("year"),
            y: name("salary"),
            hue: None,
        };
        let Some(Artifact::Line(chart)) = dispatch(&salaries(), &request).unwrap() else {
            panic!("expected a line chart");
        };
        assert_eq!(chart.series.len(), 1);
        assert_eq!(
            chart.series[0].points,
            vec![[2020.0, 100.0], [2021.0, 105.0], [2022.0, 310.0 / 3.0]]
        );
    }

    #[test]
    fn scatter_groups_points_by_hue() {
        let request = ChartRequest::ScatterPlot {
            x: name("year"),
            y: name("salary"),
            hue: name("title"),
        };
        let Some(Artifact::Scatter(chart)) = dispatch(&salaries(), &request).unwrap() else {
            panic!("expected a scatter plot");
        };
        let labels: Vec<Option<String>> = chart.series.iter().map(|s| s.label.clone()).collect();
        assert_eq!(labels, vec![name("DS"), name("MLE"), name("DA")]);
        assert_eq!(chart.series[0].points.len(), 3);
    }

    #[test]
    fn scatter_with_categorical_axis_is_invalid() {
        let request = ChartRequest::ScatterPlot {
            x: name("title"),
            y: name("salary"),
            hue: None,
        };
        assert!(matches!(
            dispatch(&salaries(), &request),
            Err(EdaError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn pair_plot_builds_square_grid() {
        let request = ChartRequest::PairPlot {
            columns: vec!["salary".into(), "year".into()],
            hue: name("level"),
        };
        let Some(Artifact::PairGrid(grid)) = dispatch(&salaries(), &request).unwrap() else {
            panic!("expected a pair grid");
        };
        assert_eq!(grid.cells.len(), 2);
        assert_eq!(grid.groups, vec!["SE", "EN", "MI"]);

        let PairCell::Histogram { edges, groups } = &grid.cells[0][0] else {
            panic!("diagonal should be a histogram");
        };
        assert_eq!(edges.len(), HISTOGRAM_BINS + 1);
        let binned: usize = groups.iter().flat_map(|h| &h.counts).sum();
        assert_eq!(binned, 6);

        let PairCell::Scatter(series) = &grid.cells[0][1] else {
            panic!("off-diagonal should be a scatter");
        };
        // x = year, y = salary
        assert_eq!(series[0].points[0], [2020.0, 100.0]);
    }

    #[test]
    fn pair_plot_needs_columns() {
        let request = ChartRequest::PairPlot {
            columns: vec![],
            hue: None,
        };
        assert!(matches!(
            dispatch(&salaries(), &request),
            Err(EdaError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn missing_column_is_invalid() {
        let request = ChartRequest::PieChart {
            column: name("nope"),
        };
        let err = dispatch(&salaries(), &request).unwrap_err();
        assert!(err.to_string().contains("'nope' not found"));
    }

    #[test]
    fn constant_column_histogram_uses_unit_range() {
        let edges = histogram_edges([4.0, 4.0].into_iter(), 2);
        assert_eq!(edges, vec![3.5, 4.0, 4.5]);
        assert_eq!(bin_of(&edges, 4.5), Some(1));
        assert_eq!(bin_of(&edges, 5.0), None);
    }

    #[test]
    fn request_kind_matches_variant() {
        let request = ChartRequest::LineChart {
            x: None,
            y: None,
            hue: None,
        };
        assert_eq!(request.kind(), ChartKind::LineChart);
    }
}
