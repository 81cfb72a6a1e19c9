use std::path::PathBuf;

use crate::data::loader::FileFormat;

// ---------------------------------------------------------------------------
// Chart limits
// ---------------------------------------------------------------------------

/// Categories shown by the count plot.
pub const COUNT_PLOT_TOP_N: usize = 15;

/// Slices shown by the pie chart.
pub const PIE_CHART_TOP_N: usize = 5;

/// Equal-width bins on the pair plot diagonal.
pub const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Dashboard defaults
// ---------------------------------------------------------------------------

/// Start-up defaults for the dashboard window.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Bundled dataset loaded by the "use local dataset" toggle.
    pub local_dataset: PathBuf,
    pub local_dataset_format: FileFormat,
    /// How many numeric columns the pair plot pre-selects.
    pub pair_plot_default_columns: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            local_dataset: PathBuf::from("ds_salaries.csv"),
            local_dataset_format: FileFormat::Csv,
            pair_plot_default_columns: 3,
            window_size: [1280.0, 860.0],
            min_window_size: [720.0, 480.0],
        }
    }
}
