use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::{dispatch, Artifact, ChartKind, ChartRequest, CrosstabDisplay};
use crate::config::DashboardConfig;
use crate::data::classify::{classify, ColumnPartition};
use crate::data::loader::{self, FileFormat};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Widget state
// ---------------------------------------------------------------------------

/// Which sections are switched on.
#[derive(Debug, Clone, Default)]
pub struct Toggles {
    pub shape: bool,
    pub info: bool,
    pub describe: bool,
    pub pair_plot: bool,
    pub correlation: bool,
    pub crosstab: bool,
    pub count_plot: bool,
    pub line_chart: bool,
    pub scatter_plot: bool,
    pub pie_chart: bool,
}

impl Toggles {
    pub fn flag_mut(&mut self, kind: ChartKind) -> &mut bool {
        match kind {
            ChartKind::Shape => &mut self.shape,
            ChartKind::Info => &mut self.info,
            ChartKind::Describe => &mut self.describe,
            ChartKind::PairPlot => &mut self.pair_plot,
            ChartKind::CorrelationHeatmap => &mut self.correlation,
            ChartKind::Crosstab => &mut self.crosstab,
            ChartKind::CountPlot => &mut self.count_plot,
            ChartKind::LineChart => &mut self.line_chart,
            ChartKind::ScatterPlot => &mut self.scatter_plot,
            ChartKind::PieChart => &mut self.pie_chart,
        }
    }

    pub fn is_on(&self, kind: ChartKind) -> bool {
        match kind {
            ChartKind::Shape => self.shape,
            ChartKind::Info => self.info,
            ChartKind::Describe => self.describe,
            ChartKind::PairPlot => self.pair_plot,
            ChartKind::CorrelationHeatmap => self.correlation,
            ChartKind::Crosstab => self.crosstab,
            ChartKind::CountPlot => self.count_plot,
            ChartKind::LineChart => self.line_chart,
            ChartKind::ScatterPlot => self.scatter_plot,
            ChartKind::PieChart => self.pie_chart,
        }
    }
}

/// Column choices made through the selectors. `None` = not chosen yet.
#[derive(Debug, Clone, Default)]
pub struct Selections {
    pub pair_columns: Vec<String>,
    pub pair_hue: Option<String>,
    pub correlation_columns: Vec<String>,
    pub crosstab_index: Option<String>,
    pub crosstab_column: Option<String>,
    pub crosstab_heatmap: bool,
    pub count_column: Option<String>,
    pub line_x: Option<String>,
    pub line_y: Option<String>,
    pub line_hue: Option<String>,
    pub scatter_x: Option<String>,
    pub scatter_y: Option<String>,
    pub scatter_hue: Option<String>,
    pub pie_column: Option<String>,
}

impl Selections {
    /// First-option defaults, the way a fresh set of selectboxes starts out.
    fn defaults_for(partition: &ColumnPartition, pair_columns: usize) -> Self {
        let first_cat = partition.categorical.first().cloned();
        let first_num = partition.numeric.first().cloned();
        Selections {
            pair_columns: partition.numeric.iter().take(pair_columns).cloned().collect(),
            pair_hue: first_cat.clone(),
            count_column: first_cat.clone(),
            pie_column: first_cat,
            line_x: first_num.clone(),
            line_y: first_num.clone(),
            scatter_x: first_num.clone(),
            scatter_y: first_num,
            ..Selections::default()
        }
    }
}

/// Result of one section: an artifact, nothing to draw, or an error message.
pub type Outcome = std::result::Result<Option<Artifact>, String>;

#[derive(Debug)]
struct Cached {
    request: ChartRequest,
    outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Where the dataset came from, for the status line.
    pub source: Option<String>,

    /// Column names split by kind, computed once per dataset.
    pub partition: ColumnPartition,

    /// Format the next opened file is parsed as.
    pub format: FileFormat,

    /// "Use local dataset" checkbox.
    pub use_local: bool,

    pub toggles: Toggles,
    pub selections: Selections,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Last request and outcome per section.
    cache: HashMap<ChartKind, Cached>,

    /// Number of dispatches run so far.
    dispatches: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            format: config.local_dataset_format,
            config,
            dataset: None,
            source: None,
            partition: ColumnPartition::default(),
            use_local: false,
            toggles: Toggles::default(),
            selections: Selections::default(),
            status_message: None,
            cache: HashMap::new(),
            dispatches: 0,
        }
    }

    /// Ingest a newly loaded dataset, reset selections and cached charts.
    pub fn set_dataset(&mut self, dataset: Dataset, source: String) {
        log::info!(
            "Loaded {} rows x {} columns from {source}",
            dataset.len(),
            dataset.n_columns()
        );
        log::debug!(
            "Columns: {}",
            dataset.column_names().collect::<Vec<_>>().join(", ")
        );
        self.partition = classify(&dataset);
        self.selections =
            Selections::defaults_for(&self.partition, self.config.pair_plot_default_columns);
        self.cache.clear();
        self.dataset = Some(dataset);
        self.source = Some(source);
        self.status_message = None;
    }

    /// Drop the current dataset and everything derived from it.
    pub fn clear_dataset(&mut self) {
        self.dataset = None;
        self.source = None;
        self.partition = ColumnPartition::default();
        self.selections = Selections::default();
        self.cache.clear();
    }

    /// Load `path` as `format`, reporting failure in the status line.
    pub fn load_path(&mut self, path: &Path, format: FileFormat) {
        match read_dataset(path, format) {
            Ok(dataset) => self.set_dataset(dataset, path.display().to_string()),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// React to the "use local dataset" checkbox.
    pub fn set_use_local(&mut self, use_local: bool) {
        self.use_local = use_local;
        let local = self.config.local_dataset.clone();
        let local_source = local.display().to_string();

        if use_local {
            self.load_path(&local, self.config.local_dataset_format);
        } else if self.source.as_deref() == Some(local_source.as_str()) {
            self.clear_dataset();
        }
    }

    /// Build the request for a section from the current selections.
    pub fn request_for(&self, kind: ChartKind) -> ChartRequest {
        let s = &self.selections;
        match kind {
            ChartKind::Shape => ChartRequest::Shape,
            ChartKind::Info => ChartRequest::Info,
            ChartKind::Describe => ChartRequest::Describe,
            ChartKind::PairPlot => ChartRequest::PairPlot {
                columns: s.pair_columns.clone(),
                hue: s.pair_hue.clone(),
            },
            ChartKind::CorrelationHeatmap => ChartRequest::CorrelationHeatmap {
                columns: s.correlation_columns.clone(),
            },
            ChartKind::Crosstab => ChartRequest::Crosstab {
                index: s.crosstab_index.clone(),
                column: s.crosstab_column.clone(),
                display: if s.crosstab_heatmap {
                    CrosstabDisplay::Heatmap
                } else {
                    CrosstabDisplay::Table
                },
            },
            ChartKind::CountPlot => ChartRequest::CountPlot {
                column: s.count_column.clone(),
            },
            ChartKind::LineChart => ChartRequest::LineChart {
                x: s.line_x.clone(),
                y: s.line_y.clone(),
                hue: s.line_hue.clone(),
            },
            ChartKind::ScatterPlot => ChartRequest::ScatterPlot {
                x: s.scatter_x.clone(),
                y: s.scatter_y.clone(),
                hue: s.scatter_hue.clone(),
            },
            ChartKind::PieChart => ChartRequest::PieChart {
                column: s.pie_column.clone(),
            },
        }
    }

    /// Outcome of a section, recomputed only when its request changed.
    ///
    /// `None` while no dataset is loaded.
    pub fn outcome(&mut self, kind: ChartKind) -> Option<&Outcome> {
        let request = self.request_for(kind);
        let dataset = self.dataset.as_ref()?;

        let stale = self
            .cache
            .get(&kind)
            .map_or(true, |cached| cached.request != request);
        if stale {
            self.dispatches += 1;
            log::debug!(
                "Recomputing {} (dispatch #{})",
                request.kind(),
                self.dispatches
            );
            let outcome = dispatch(dataset, &request).map_err(|e| {
                log::warn!("{kind}: {e}");
                e.to_string()
            });
            self.cache.insert(kind, Cached { request, outcome });
        }
        self.cache.get(&kind).map(|cached| &cached.outcome)
    }
}

fn read_dataset(path: &Path, format: FileFormat) -> Result<Dataset> {
    loader::load_file(path, format)
        .with_context(|| format!("loading {} as {format}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CSV: &str = "\
job_title,experience_level,salary_in_usd,work_year
Data Scientist,SE,100,2020
ML Engineer,EN,60,2021
Data Scientist,MI,80,2021
";

    fn loaded() -> (AppState, tempfile::NamedTempFile) {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let mut state = AppState::default();
        state.load_path(file.path(), FileFormat::Csv);
        (state, file)
    }

    #[test]
    fn loading_sets_partition_and_defaults() {
        let (state, _file) = loaded();
        assert!(state.dataset.is_some());
        assert_eq!(
            state.partition.categorical,
            vec!["job_title", "experience_level"]
        );
        assert_eq!(state.selections.count_column.as_deref(), Some("job_title"));
        assert_eq!(state.selections.line_x.as_deref(), Some("salary_in_usd"));
        assert_eq!(state.selections.pair_columns.len(), 2);
        assert_eq!(state.selections.crosstab_index, None);
    }

    #[test]
    fn load_failure_keeps_session_alive() {
        let mut state = AppState::default();
        state.load_path(Path::new("/nonexistent/ds.csv"), FileFormat::Csv);
        assert!(state.dataset.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Error: loading /nonexistent/ds.csv as csv"));
    }

    #[test]
    fn outcome_is_recomputed_only_when_request_changes() {
        let (mut state, _file) = loaded();
        assert!(matches!(
            state.outcome(ChartKind::CountPlot),
            Some(Ok(Some(_)))
        ));
        state.outcome(ChartKind::CountPlot);
        assert_eq!(state.dispatches, 1);

        state.selections.count_column = Some("experience_level".into());
        state.outcome(ChartKind::CountPlot);
        assert_eq!(state.dispatches, 2);

        // another section has its own cache entry
        state.outcome(ChartKind::Shape);
        state.outcome(ChartKind::CountPlot);
        assert_eq!(state.dispatches, 3);
    }

    #[test]
    fn invalid_selection_becomes_message() {
        let (mut state, _file) = loaded();
        state.selections.scatter_x = Some("job_title".into());
        let outcome = state.outcome(ChartKind::ScatterPlot).unwrap();
        assert!(outcome.as_ref().unwrap_err().contains("invalid selection"));
    }

    #[test]
    fn unselected_crosstab_is_a_no_op() {
        let (mut state, _file) = loaded();
        assert!(matches!(state.outcome(ChartKind::Crosstab), Some(Ok(None))));
    }

    #[test]
    fn toggles_are_independent() {
        let mut toggles = Toggles::default();
        *toggles.flag_mut(ChartKind::PieChart) = true;
        assert!(toggles.is_on(ChartKind::PieChart));
        assert!(!toggles.is_on(ChartKind::CountPlot));
    }

    #[test]
    fn unchecking_local_dataset_clears_it() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let config = DashboardConfig {
            local_dataset: file.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        let mut state = AppState::new(config);

        state.set_use_local(true);
        assert!(state.dataset.is_some());
        state.set_use_local(false);
        assert!(state.dataset.is_none());
    }
}
