use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{DataStore, RawRow};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a title catalogue from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `release_year`, `type`, `rating`, `duration`
/// * `.json`    – `[{ "release_year": 2019, "type": "Movie", ... }, ...]`
/// * `.parquet` – same columns, strings or integers
///
/// Extra columns are ignored. Missing columns read as empty cells, so a
/// missing `release_year` fails the load like any other unparsable year.
pub fn load_file(path: &Path) -> Result<DataStore> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let store = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let range = store.year_range();
    log::info!(
        "Loaded {} titles from {} (release years {}–{})",
        store.len(),
        path.display(),
        range.min,
        range.max
    );
    Ok(store)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV with a header row; columns are matched by name via serde.
pub fn load_csv<R: Read>(reader: R) -> Result<DataStore> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let rows = reader
        .deserialize::<RawRow>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(DataStore::load(rows)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
///
/// Cells may be strings or numbers; numbers are kept as their text form so
/// `release_year` goes through the same parse as every other format.
pub fn load_json(text: &str) -> Result<DataStore> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let rows = records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRow> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            let cell = |key: &str| obj.get(key).map(json_to_text).unwrap_or_default();
            Ok(RawRow {
                title: cell("title"),
                kind: cell("type"),
                release_year: cell("release_year"),
                rating: cell("rating"),
                duration: cell("duration"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DataStore::load(rows)?)
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Parquet file written by Pandas or Polars with the catalogue columns.
fn load_parquet(path: &Path) -> Result<DataStore> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| {
            schema
                .index_of(name)
                .ok()
                .map(|i| {
                    normalize_column(batch.column(i))
                        .with_context(|| format!("Parquet column '{name}'"))
                })
                .transpose()
        };

        let year_col = column("release_year")?
            .context("Parquet file missing 'release_year' column")?;
        let kind_col = column("type")?;
        let rating_col = column("rating")?;
        let duration_col = column("duration")?;
        let title_col = column("title")?;

        for row in 0..batch.num_rows() {
            let cell = |col: Option<&ArrayRef>| {
                col.map(|c| cell_to_text(c, row)).transpose()
            };
            rows.push(RawRow {
                title: cell(title_col.as_ref())?.unwrap_or_default(),
                kind: cell(kind_col.as_ref())?.unwrap_or_default(),
                release_year: cell_to_text(&year_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'release_year'"))?,
                rating: cell(rating_col.as_ref())?.unwrap_or_default(),
                duration: cell(duration_col.as_ref())?.unwrap_or_default(),
            });
        }
    }

    Ok(DataStore::load(rows)?)
}

/// Cast the column kinds Pandas and Polars commonly write down to the few
/// types [`cell_to_text`] reads: `Utf8`, `Int64`, `Float32`, `Float64`.
///
/// Dictionary (`category` / `Categorical`), large and view strings become
/// `Utf8`; every integer width becomes `Int64`.
fn normalize_column(col: &ArrayRef) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Utf8 | DataType::Int64 | DataType::Float32 | DataType::Float64 => {
            return Ok(Arc::clone(col));
        }
        DataType::Dictionary(_, _) | DataType::LargeUtf8 | DataType::Utf8View => DataType::Utf8,
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => DataType::Int64,
        other => bail!("unsupported column type {other:?}"),
    };
    cast(col, &target).with_context(|| format!("casting {:?} to {target:?}", col.data_type()))
}

/// Text form of a single normalized Arrow cell. Nulls become empty strings.
///
/// Whole floats print without a fraction so a year stored as `2019.0`
/// parses like `2019`.
fn cell_to_text(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    let text = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row)
            .to_string(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row)
            .to_string(),
        DataType::Float32 => float_to_text(
            col.as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?
                .value(row) as f64,
        ),
        DataType::Float64 => float_to_text(
            col.as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?
                .value(row),
        ),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(text)
}

fn float_to_text(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
