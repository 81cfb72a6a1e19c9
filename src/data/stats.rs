//! Descriptive statistics over a loaded [`Dataset`].
//!
//! Everything here is a pure function of its inputs. Undefined results
//! (mean of nothing, std of a single value, correlation with a constant
//! column) are `NaN` rather than errors, matching what Pandas reports.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use super::model::{CellValue, DType, Dataset};

// ---------------------------------------------------------------------------
// Info
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: DType,
}

/// Per-column non-null counts and dtypes.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoSummary {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

impl InfoSummary {
    /// Number of columns per dtype, in first-seen order.
    pub fn dtype_counts(&self) -> Vec<(DType, usize)> {
        let mut counts: Vec<(DType, usize)> = Vec::new();
        for col in &self.columns {
            match counts.iter_mut().find(|(d, _)| *d == col.dtype) {
                Some((_, n)) => *n += 1,
                None => counts.push((col.dtype, 1)),
            }
        }
        counts
    }
}

pub fn info(dataset: &Dataset) -> InfoSummary {
    let columns = dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, col)| ColumnInfo {
            name: col.name.clone(),
            non_null: dataset.cells(idx).filter(|c| !c.is_null()).count(),
            dtype: col.dtype,
        })
        .collect();
    InfoSummary {
        rows: dataset.len(),
        columns,
    }
}

impl fmt::Display for InfoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows == 0 {
            writeln!(f, "RangeIndex: 0 entries")?;
        } else {
            writeln!(f, "RangeIndex: {} entries, 0 to {}", self.rows, self.rows - 1)?;
        }
        writeln!(f, "Data columns (total {} columns):", self.columns.len())?;

        let name_width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Column".len());
        writeln!(
            f,
            " {:>3}  {:<name_width$}  {:<14}  Dtype",
            "#", "Column", "Non-Null Count"
        )?;
        writeln!(
            f,
            " {:>3}  {:<name_width$}  {:<14}  -----",
            "---", "------", "--------------"
        )?;
        for (idx, col) in self.columns.iter().enumerate() {
            let count = format!("{} non-null", col.non_null);
            writeln!(
                f,
                " {idx:>3}  {:<name_width$}  {count:<14}  {}",
                col.name, col.dtype
            )?;
        }

        let tally: Vec<String> = self
            .dtype_counts()
            .iter()
            .map(|(dtype, n)| format!("{dtype}({n})"))
            .collect();
        write!(f, "dtypes: {}", tally.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Describe
// ---------------------------------------------------------------------------

/// Standard summary statistics of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Values in the order of [`Summary::LABELS`].
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Summarize a numeric series, skipping missing and NaN values.
pub fn summarize(values: impl IntoIterator<Item = Option<f64>>) -> Summary {
    let mut sorted: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    if count == 0 {
        return Summary {
            count,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    Summary {
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Summaries of the given columns, in the order given.
pub fn describe(dataset: &Dataset, columns: &[usize]) -> Vec<(String, Summary)> {
    columns
        .iter()
        .map(|&idx| {
            (
                dataset.columns()[idx].name.clone(),
                summarize(dataset.numeric_values(idx)),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation over pairwise-complete observations.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

/// Square correlation matrix of the given columns.
pub fn correlation_matrix(dataset: &Dataset, columns: &[usize]) -> Vec<Vec<f64>> {
    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|&idx| dataset.numeric_values(idx))
        .collect();

    let n = series.len();
    let mut matrix = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    matrix
}

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Frequency of each non-null value, most frequent first.
///
/// Ties keep the order in which the values first appear, so the result is
/// deterministic for identical input.
pub fn value_counts<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Vec<(CellValue, usize)> {
    let mut slots: HashMap<&CellValue, usize> = HashMap::new();
    let mut counts: Vec<(CellValue, usize)> = Vec::new();

    for cell in cells {
        if cell.is_null() {
            continue;
        }
        match slots.get(cell) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(cell, counts.len());
                counts.push((cell.clone(), 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The `n` most frequent values.
pub fn top_n<'a>(cells: impl IntoIterator<Item = &'a CellValue>, n: usize) -> Vec<(CellValue, usize)> {
    let mut counts = value_counts(cells);
    counts.truncate(n);
    counts
}

// ---------------------------------------------------------------------------
// Crosstab
// ---------------------------------------------------------------------------

/// Contingency table of two columns' co-occurring values.
#[derive(Debug, Clone, PartialEq)]
pub struct Crosstab {
    /// Distinct values of the index column, ascending.
    pub index: Vec<CellValue>,
    /// Distinct values of the column variable, ascending.
    pub columns: Vec<CellValue>,
    /// `counts[i][j]` = rows with `index[i]` and `columns[j]`.
    pub counts: Vec<Vec<usize>>,
}

impl Crosstab {
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

/// Count co-occurrences; rows where either value is null are skipped.
pub fn crosstab(dataset: &Dataset, index_col: usize, column_col: usize) -> Crosstab {
    let mut cells: BTreeMap<(&CellValue, &CellValue), usize> = BTreeMap::new();
    let mut index: BTreeSet<&CellValue> = BTreeSet::new();
    let mut columns: BTreeSet<&CellValue> = BTreeSet::new();

    for row in dataset.rows() {
        let (a, b) = (&row[index_col], &row[column_col]);
        if a.is_null() || b.is_null() {
            continue;
        }
        index.insert(a);
        columns.insert(b);
        *cells.entry((a, b)).or_default() += 1;
    }

    let counts = index
        .iter()
        .map(|a| {
            columns
                .iter()
                .map(|b| cells.get(&(*a, *b)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Crosstab {
        index: index.into_iter().cloned().collect(),
        columns: columns.into_iter().cloned().collect(),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    fn repeated(counts: &[(&str, usize)]) -> Vec<CellValue> {
        counts.iter()
            .flat_map(|(v, n)| std::iter::repeat(s(v)).take(*n))
            .collect()
    }

    #[test]
    fn summary_of_one_two_three() {
        let summary = summarize([Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 3.0);
        assert_eq!(summary.median, 2.0);
        assert_eq!(summary.std, 1.0);
        assert_eq!(summary.q25, 1.5);
    }

    #[test]
    fn summary_skips_missing_values() {
        let summary = summarize([Some(4.0), None, Some(f64::NAN)]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, 4.0);
        assert!(summary.std.is_nan());
    }

    #[test]
    fn summary_of_nothing_is_nan() {
        let summary = summarize(std::iter::empty());
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.max.is_nan());
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn pearson_of_linear_series() {
        let xs = [Some(1.0), Some(2.0), Some(3.0), None];
        let up = [Some(2.0), Some(4.0), Some(6.0), Some(100.0)];
        let down = [Some(3.0), Some(2.0), Some(1.0), Some(0.0)];
        assert!((pearson(&xs, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_with_constant_column_is_nan() {
        let xs = [Some(1.0), Some(2.0), Some(3.0)];
        let flat = [Some(5.0), Some(5.0), Some(5.0)];
        assert!(pearson(&xs, &flat).is_nan());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let ds = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Float(0.3)],
                vec![CellValue::Integer(2), CellValue::Float(0.1)],
                vec![CellValue::Integer(3), CellValue::Float(0.9)],
            ],
        );
        let m = correlation_matrix(&ds, &[0, 1]);
        assert!((m[0][0] - 1.0).abs() < 1e-12);
        assert!((m[1][1] - 1.0).abs() < 1e-12);
        assert_eq!(m[0][1], m[1][0]);
    }

    #[test]
    fn value_counts_break_ties_by_first_appearance() {
        let mut cells = repeated(&[("D", 1), ("C", 8), ("A", 10)]);
        cells.extend(repeated(&[("B", 8)]));
        let counts = value_counts(&cells);
        let order: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();
        assert_eq!(order, vec!["A", "C", "B", "D"]);
    }

    #[test]
    fn top_two_of_tied_counts() {
        let cells = repeated(&[("A", 10), ("B", 8), ("C", 8), ("D", 1)]);
        let top = top_n(&cells, 2);
        assert_eq!(top, vec![(s("A"), 10), (s("B"), 8)]);
    }

    #[test]
    fn value_counts_skip_nulls() {
        let cells = vec![s("x"), CellValue::Null, s("x")];
        assert_eq!(value_counts(&cells), vec![(s("x"), 2)]);
    }

    #[test]
    fn crosstab_counts_every_row() {
        let ds = Dataset::from_rows(
            vec!["level".into(), "size".into()],
            vec![
                vec![s("SE"), s("M")],
                vec![s("EN"), s("L")],
                vec![s("SE"), s("L")],
                vec![s("SE"), s("M")],
            ],
        );
        let ct = crosstab(&ds, 0, 1);
        assert_eq!(ct.index, vec![s("EN"), s("SE")]);
        assert_eq!(ct.columns, vec![s("L"), s("M")]);
        assert_eq!(ct.counts, vec![vec![1, 0], vec![1, 2]]);
        assert_eq!(ct.total(), ds.len());
    }

    #[test]
    fn info_counts_non_null_cells() {
        let ds = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::Integer(1), s("x")],
                vec![CellValue::Null, s("y")],
            ],
        );
        let summary = info(&ds);
        assert_eq!(summary.columns[0].non_null, 1);
        assert_eq!(summary.columns[1].dtype, DType::Text);
        let text = summary.to_string();
        assert!(text.contains("RangeIndex: 2 entries, 0 to 1"));
        assert!(text.contains("dtypes: int64(1), object(1)"));
    }

    proptest! {
        #[test]
        fn top_n_is_deterministic_and_sorted(
            labels in prop::collection::vec("[a-d]", 0..40),
            n in 0usize..6,
        ) {
            let cells: Vec<CellValue> = labels.into_iter().map(CellValue::String).collect();
            let first = top_n(&cells, n);
            let second = top_n(&cells, n);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.len() <= n);
            prop_assert!(first.windows(2).all(|w| w[0].1 >= w[1].1));
        }
    }
}
