use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use bytes::Bytes;
use calamine::{Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, DType, Dataset};
use crate::error::{EdaError, Result};

// ---------------------------------------------------------------------------
// File format tag
// ---------------------------------------------------------------------------

/// The declared format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileFormat {
    #[default]
    Csv,
    /// Excel / OpenDocument spreadsheet, first worksheet.
    Excel,
    Parquet,
    /// Records-oriented JSON: `[{ "col": value, ... }, ...]`
    Json,
}

impl FileFormat {
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Csv,
        FileFormat::Excel,
        FileFormat::Parquet,
        FileFormat::Json,
    ];

    /// File extensions offered in the open dialog for this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileFormat::Csv => &["csv"],
            FileFormat::Excel => &["xlsx", "xlsm", "xls", "ods"],
            FileFormat::Parquet => &["parquet", "pq"],
            FileFormat::Json => &["json"],
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Result<FileFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        FileFormat::ALL
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
            .ok_or(EdaError::UnsupportedFormat {
                format: format!(".{ext}"),
            })
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::Csv => "csv",
            FileFormat::Excel => "excel",
            FileFormat::Parquet => "parquet",
            FileFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for FileFormat {
    type Err = EdaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(FileFormat::Csv),
            "excel" | "xlsx" | "xlsm" | "xls" | "ods" | "tabular-spreadsheet" => {
                Ok(FileFormat::Excel)
            }
            "parquet" | "pq" => Ok(FileFormat::Parquet),
            "json" => Ok(FileFormat::Json),
            _ => Err(EdaError::UnsupportedFormat {
                format: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a file on disk, parsed as `format`.
pub fn load_file(path: &Path, format: FileFormat) -> Result<Dataset> {
    let bytes = std::fs::read(path).map_err(|source| EdaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Reading {} ({} bytes) as {format}", path.display(), bytes.len());
    load_bytes(&bytes, format)
}

/// Load a dataset from raw file content, parsed as `format`.
pub fn load_bytes(bytes: &[u8], format: FileFormat) -> Result<Dataset> {
    let dataset = match format {
        FileFormat::Csv => load_csv(bytes),
        FileFormat::Excel => load_excel(bytes),
        FileFormat::Parquet => load_parquet(bytes),
        FileFormat::Json => load_json(bytes),
    }?;

    if dataset.n_columns() == 0 {
        return Err(EdaError::parse(format, "no columns to parse"));
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per row.
///
/// A record shorter than the header gets nulls for its missing trailing
/// fields; a longer one is a parse error. Columns whose cells are all numbers (or all booleans) are
/// typed; any other column keeps its original text, surrounding whitespace
/// and numeric-looking cells included.
fn load_csv(bytes: &[u8]) -> Result<Dataset> {
    let csv_err = |context: String| EdaError::parse(FileFormat::Csv, context);

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_err(format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_err(format!("CSV row {row_no}: {e}")))?;
        if record.len() > headers.len() {
            return Err(csv_err(format!(
                "CSV row {row_no}: expected {} fields, saw {}",
                headers.len(),
                record.len()
            )));
        }
        let mut fields: Vec<String> = record.iter().map(|v| v.to_string()).collect();
        // missing trailing fields read as empty, i.e. null
        fields.resize(headers.len(), String::new());
        raw_rows.push(fields);
    }

    let mut rows: Vec<Vec<CellValue>> = raw_rows
        .iter()
        .map(|raw| raw.iter().map(|v| guess_cell_value(v)).collect())
        .collect();

    // Text columns keep the raw strings so "007" stays "007".
    for col in 0..headers.len() {
        if DType::infer(rows.iter().map(|row| &row[col])) != DType::Text {
            continue;
        }
        for (row, raw) in rows.iter_mut().zip(&raw_rows) {
            if !row[col].is_null() {
                row[col] = CellValue::String(raw[col].clone());
            }
        }
    }

    Ok(Dataset::from_rows(headers, rows))
}

const NULL_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "<na>"];

fn guess_cell_value(raw: &str) -> CellValue {
    let s = raw.trim();
    if NULL_TOKENS.contains(&s.to_ascii_lowercase().as_str()) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        return CellValue::Bool(s.eq_ignore_ascii_case("true"));
    }
    CellValue::String(raw.to_string())
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Read the first worksheet; its first row is the header.
fn load_excel(bytes: &[u8]) -> Result<Dataset> {
    let excel_err = |context: String| EdaError::parse(FileFormat::Excel, context);

    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| excel_err(format!("opening workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| excel_err("workbook has no worksheets".to_string()))?
        .map_err(|e| excel_err(format!("reading first worksheet: {e}")))?;

    let mut sheet_rows = range.rows();
    let headers: Vec<String> = match sheet_rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| match cell {
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect(),
        None => return Err(excel_err("worksheet is empty".to_string())),
    };

    let rows = sheet_rows
        .map(|row| row.iter().map(excel_to_cell).collect())
        .collect();

    Ok(Dataset::from_rows(headers, rows))
}

fn excel_to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        // Spreadsheets store every number as a float; whole numbers come back
        // as integers so integer columns stay int64.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            CellValue::Integer(*f as i64)
        }
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Empty | Data::Error(_) => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load every record batch of a Parquet file.
///
/// Primitive Arrow columns map onto typed cells; anything else (dates,
/// decimals, nested types) is rendered as text.
fn load_parquet(bytes: &[u8]) -> Result<Dataset> {
    let parquet_err = |context: String| EdaError::parse(FileFormat::Parquet, context);

    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::copy_from_slice(bytes))
        .map_err(|e| parquet_err(format!("reading parquet metadata: {e}")))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder
        .build()
        .map_err(|e| parquet_err(format!("building parquet reader: {e}")))?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch =
            batch_result.map_err(|e| parquet_err(format!("reading parquet record batch: {e}")))?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| arrow_to_cell(col, row))
                    .collect(),
            );
        }
    }

    Ok(Dataset::from_rows(headers, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_to_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => {
            CellValue::Integer(col.as_primitive::<UInt16Type>().value(row) as i64)
        }
        DataType::UInt32 => {
            CellValue::Integer(col.as_primitive::<UInt32Type>().value(row) as i64)
        }
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v)
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Float(v as f64))
        }
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        _ => arrow::util::display::array_value_to_string(col.as_ref(), row)
            .map(CellValue::String)
            .unwrap_or(CellValue::Null),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "job_title": "Data Scientist", "salary_in_usd": 79833 },
///   ...
/// ]
/// ```
///
/// Columns appear in the order their keys are first seen; a key missing
/// from a record is a null cell.
fn load_json(bytes: &[u8]) -> Result<Dataset> {
    let json_err = |context: String| EdaError::parse(FileFormat::Json, context);

    let root: JsonValue =
        serde_json::from_slice(bytes).map_err(|e| json_err(format!("parsing JSON: {e}")))?;
    let records = root
        .as_array()
        .ok_or_else(|| json_err("expected top-level JSON array".to_string()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| json_err(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|key| obj.get(key).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Dataset::from_rows(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}
