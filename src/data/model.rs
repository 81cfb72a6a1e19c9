use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Used as a `BTreeMap` key downstream, so `CellValue` must be `Ord`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeMap / HashMap keys --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`. Booleans count as 0/1 like Pandas.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column schema
// ---------------------------------------------------------------------------

/// Physical type of a column, inferred once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Int64,
    Float64,
    Bool,
    Text,
}

impl DType {
    /// Infer the narrowest type holding every non-null cell.
    ///
    /// An all-null column is `Float64`, the way Pandas types a NaN column.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> DType {
        let mut seen: Option<DType> = None;
        for cell in cells {
            let dtype = match cell {
                CellValue::Null => continue,
                CellValue::Integer(_) => DType::Int64,
                CellValue::Float(_) => DType::Float64,
                CellValue::Bool(_) => DType::Bool,
                CellValue::String(_) => return DType::Text,
            };
            seen = Some(match (seen, dtype) {
                (None, d) => d,
                (Some(a), b) if a == b => a,
                (Some(DType::Int64), DType::Float64) | (Some(DType::Float64), DType::Int64) => {
                    DType::Float64
                }
                // bool mixed with numbers is an object column in Pandas
                _ => return DType::Text,
            });
        }
        seen.unwrap_or(DType::Float64)
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            DType::Text => ColumnKind::Categorical,
            DType::Int64 | DType::Float64 | DType::Bool => ColumnKind::Numeric,
        }
    }

    /// Coerce a cell into this dtype. Cells that do not fit become `Null`.
    fn coerce(self, cell: CellValue) -> CellValue {
        match (self, cell) {
            (_, CellValue::Null) => CellValue::Null,
            (DType::Text, CellValue::String(s)) => CellValue::String(s),
            (DType::Text, other) => CellValue::String(other.to_string()),
            (DType::Int64, CellValue::Integer(i)) => CellValue::Integer(i),
            (DType::Float64, CellValue::Float(v)) => CellValue::Float(v),
            (DType::Float64, CellValue::Integer(i)) => CellValue::Float(i as f64),
            (DType::Bool, CellValue::Bool(b)) => CellValue::Bool(b),
            _ => CellValue::Null,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
            DType::Bool => "bool",
            DType::Text => "object",
        };
        f.write_str(name)
    }
}

/// How the dashboard treats a column: discrete labels or numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Categorical => f.write_str("categorical"),
            ColumnKind::Numeric => f.write_str("numeric"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: DType,
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        self.dtype.kind()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table: ordered schema plus row-major cells.
///
/// Every row holds exactly one cell per column, already coerced to the
/// column's dtype.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset from a header row and loosely typed rows.
    ///
    /// Headers are normalized (blank → `Unnamed: i`, duplicates suffixed),
    /// short rows are padded with `Null`, surplus cells are dropped, and each
    /// column's dtype is inferred and applied.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let names = normalize_headers(headers);
        let width = names.len();

        let mut rows = rows;
        for row in &mut rows {
            row.resize(width, CellValue::Null);
        }

        let dtypes: Vec<DType> = (0..width)
            .map(|idx| DType::infer(rows.iter().map(|row| &row[idx])))
            .collect();

        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&dtypes)
                    .map(|(cell, dtype)| dtype.coerce(cell))
                    .collect()
            })
            .collect();

        let columns = names
            .into_iter()
            .zip(dtypes)
            .map(|(name, dtype)| Column { name, dtype })
            .collect();

        Dataset { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name, returning its position and schema.
    pub fn column(&self, name: &str) -> Option<(usize, &Column)> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.name == name)
    }

    /// Cells of one column, in row order.
    pub fn cells(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Numeric view of one column; non-numeric and null cells are `None`.
    pub fn numeric_values(&self, idx: usize) -> Vec<Option<f64>> {
        self.cells(idx).map(CellValue::as_f64).collect()
    }
}

/// Pandas-style header cleanup.
fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());

    for (idx, raw) in headers.into_iter().enumerate() {
        let trimmed = raw.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            trimmed.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 0;
        while seen.contains(&name) {
            suffix += 1;
            name = format!("{base}.{suffix}");
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn infers_dtypes_ignoring_nulls() {
        use CellValue::*;
        assert_eq!(DType::infer(&[Integer(1), Null, Integer(3)]), DType::Int64);
        assert_eq!(DType::infer(&[Integer(1), Float(2.5)]), DType::Float64);
        assert_eq!(DType::infer(&[Bool(true), Null]), DType::Bool);
        assert_eq!(DType::infer(&[Integer(1), s("a")]), DType::Text);
        assert_eq!(DType::infer(&[Bool(true), Integer(1)]), DType::Text);
        assert_eq!(DType::infer(&[Null, Null]), DType::Float64);
    }

    #[test]
    fn from_rows_coerces_cells_to_column_dtype() {
        let ds = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Integer(7)],
                vec![CellValue::Float(2.5), s("x")],
            ],
        );
        assert_eq!(ds.columns()[0].dtype, DType::Float64);
        assert_eq!(ds.columns()[1].dtype, DType::Text);
        assert_eq!(ds.rows()[0][0], CellValue::Float(1.0));
        assert_eq!(ds.rows()[0][1], s("7"));
    }

    #[test]
    fn header_only_dataset_is_empty() {
        let ds = Dataset::from_rows(vec!["a".into(), "b".into()], Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.n_columns(), 2);
        assert_eq!(ds.columns()[0].dtype, DType::Float64);
    }

    #[test]
    fn short_rows_are_padded_with_null() {
        let ds = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Integer(1)]],
        );
        assert_eq!(ds.rows()[0].len(), 2);
        assert!(ds.rows()[0][1].is_null());
    }

    #[test]
    fn headers_are_normalized() {
        let names = normalize_headers(vec![
            "a".into(),
            "".into(),
            "a".into(),
            " b ".into(),
            "a".into(),
        ]);
        assert_eq!(names, vec!["a", "Unnamed: 1", "a.1", "b", "a.2"]);
    }

    #[test]
    fn kinds_follow_dtypes() {
        assert_eq!(DType::Text.kind(), ColumnKind::Categorical);
        assert_eq!(DType::Bool.kind(), ColumnKind::Numeric);
        assert_eq!(DType::Text.to_string(), "object");
    }

    #[test]
    fn float_cells_compare_totally() {
        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        assert!(CellValue::Null < CellValue::Integer(0));
        assert!(s("a") < s("b"));
    }
}
