use std::fmt;

// ---------------------------------------------------------------------------
// Chart request – rebuilt from widget state every frame
// ---------------------------------------------------------------------------

/// The fixed menu of dashboard outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Shape,
    Info,
    Describe,
    PairPlot,
    CorrelationHeatmap,
    Crosstab,
    CountPlot,
    LineChart,
    ScatterPlot,
    PieChart,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Shape => "Dataset Shape",
            ChartKind::Info => "Dataset Info",
            ChartKind::Describe => "Describe Dataset",
            ChartKind::PairPlot => "Pair Plot",
            ChartKind::CorrelationHeatmap => "Correlation Heat Map",
            ChartKind::Crosstab => "Crosstab",
            ChartKind::CountPlot => "Count Plot",
            ChartKind::LineChart => "Line Chart",
            ChartKind::ScatterPlot => "Scatter Plot",
            ChartKind::PieChart => "Pie Chart",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// How a crosstab is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrosstabDisplay {
    #[default]
    Table,
    Heatmap,
}

/// One chart to compute: the kind plus the columns it was asked for.
///
/// `None` means the user has not chosen that column yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartRequest {
    Shape,
    Info,
    Describe,
    PairPlot {
        columns: Vec<String>,
        hue: Option<String>,
    },
    CorrelationHeatmap {
        columns: Vec<String>,
    },
    Crosstab {
        index: Option<String>,
        column: Option<String>,
        display: CrosstabDisplay,
    },
    CountPlot {
        column: Option<String>,
    },
    LineChart {
        x: Option<String>,
        y: Option<String>,
        hue: Option<String>,
    },
    ScatterPlot {
        x: Option<String>,
        y: Option<String>,
        hue: Option<String>,
    },
    PieChart {
        column: Option<String>,
    },
}

impl ChartRequest {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartRequest::Shape => ChartKind::Shape,
            ChartRequest::Info => ChartKind::Info,
            ChartRequest::Describe => ChartKind::Describe,
            ChartRequest::PairPlot { .. } => ChartKind::PairPlot,
            ChartRequest::CorrelationHeatmap { .. } => ChartKind::CorrelationHeatmap,
            ChartRequest::Crosstab { .. } => ChartKind::Crosstab,
            ChartRequest::CountPlot { .. } => ChartKind::CountPlot,
            ChartRequest::LineChart { .. } => ChartKind::LineChart,
            ChartRequest::ScatterPlot { .. } => ChartKind::ScatterPlot,
            ChartRequest::PieChart { .. } => ChartKind::PieChart,
        }
    }
}
