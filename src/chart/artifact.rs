use crate::data::stats::InfoSummary;

// ---------------------------------------------------------------------------
// Renderable results of a chart request
// ---------------------------------------------------------------------------

/// What the dashboard draws for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Shape { rows: usize, columns: usize },
    Info(InfoSummary),
    Table(Table),
    /// A table drawn as an annotated heat-coloured grid.
    Heatmap(Table),
    PairGrid(PairGrid),
    CountPlot(BarChart),
    Line(XyChart),
    Scatter(XyChart),
    Pie(PieChart),
}

/// How table cells are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Integer,
    Fixed(usize),
}

impl NumberFormat {
    pub fn format(self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        match self {
            NumberFormat::Integer => format!("{value:.0}"),
            NumberFormat::Fixed(digits) => format!("{value:.digits$}"),
        }
    }
}

/// A labelled numeric matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Name of the variable along the rows (may be empty).
    pub index_name: String,
    /// Name of the variable along the columns, for crosstabs.
    pub columns_name: Option<String>,
    pub index: Vec<String>,
    pub columns: Vec<String>,
    /// `values[row][col]`
    pub values: Vec<Vec<f64>>,
    pub format: NumberFormat,
}

impl Table {
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        self.format.format(self.values[row][col])
    }

    /// Smallest and largest finite value, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Horizontal bars, first bar drawn on top.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub column: String,
    pub bars: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the displayed total, `0.0..=1.0`.
    pub fraction: f64,
    /// e.g. `"60.00%"`
    pub percent_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub column: String,
    pub slices: Vec<PieSlice>,
}

/// Points of one hue group.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Index into the chart's hue groups; drives the colour.
    pub group: usize,
    /// Hue value, `None` when the chart is not grouped.
    pub label: Option<String>,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XyChart {
    pub x_label: String,
    pub y_label: String,
    pub hue: Option<String>,
    pub series: Vec<Series>,
}

/// Bin counts of one hue group over shared bin edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub group: usize,
    pub label: Option<String>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairCell {
    /// Diagonal: distribution of one variable.
    Histogram {
        edges: Vec<f64>,
        groups: Vec<Histogram>,
    },
    /// Off-diagonal: column `j` on x against column `i` on y.
    Scatter(Vec<Series>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairGrid {
    pub columns: Vec<String>,
    pub hue: Option<String>,
    /// Hue values in first-seen order.
    pub groups: Vec<String>,
    /// `cells[i][j]`, square.
    pub cells: Vec<Vec<PairCell>>,
}
