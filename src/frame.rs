//! Bridge from Polars frames to [`Dataset`].
//!
//! Numeric dtypes become numeric attributes. Everything else (strings,
//! booleans, dates) is cast to string and becomes categorical, with levels
//! taken from the observed values. Nulls become [`Value::Missing`].

use crate::dataset::{AttributeKind, Dataset, Schema, Value};
use crate::error::{DescryError, Result};
use polars::prelude::*;
use std::path::Path;

/// Reads a CSV, JSON or NDJSON file, choosing the reader by extension.
///
/// CSV fields spelled `NA` are read as nulls.
///
/// # Errors
///
/// Fails for unknown extensions and for anything Polars cannot parse.
pub fn read_frame(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .with_null_values(Some(NullValues::AllColumnsSingle("NA".into())))
            .finish()?
            .collect()?,
        "json" => JsonReader::new(std::fs::File::open(path)?).finish()?,
        "ndjson" | "jsonl" => JsonLineReader::from_path(path)?.finish()?,
        _ => {
            return Err(DescryError::DataProcessing(format!(
                "Unsupported file extension: '{ext}' (expected csv, json, ndjson or jsonl)"
            )));
        }
    };

    tracing::debug!(
        rows = df.height(),
        columns = df.width(),
        "Read {}",
        path.display()
    );
    Ok(df)
}

/// Converts a frame into a dataset, column by column.
///
/// # Errors
///
/// Fails when a column cannot be cast, or when the frame has duplicate
/// column names.
pub fn dataset_from_frame(df: &DataFrame) -> Result<Dataset> {
    let mut schema = Schema::builder();
    let mut columns: Vec<Vec<Value>> = Vec::with_capacity(df.width());

    for col in df.get_columns() {
        let name = col.name().to_string();
        let series = col.as_materialized_series();

        if series.dtype().is_primitive_numeric() {
            let cast = series.cast(&DataType::Float64)?;
            let mut nan_count = 0_usize;
            let values: Vec<Value> = cast
                .f64()?
                .into_iter()
                .map(|v| match v {
                    Some(x) if x.is_nan() => {
                        nan_count += 1;
                        Value::Missing
                    }
                    other => Value::from(other),
                })
                .collect();
            if nan_count > 0 {
                tracing::warn!("Column '{name}': {nan_count} NaN value(s) treated as missing");
            }
            schema = schema.attribute(name, AttributeKind::Numeric);
            columns.push(values);
        } else {
            let cast = series.cast(&DataType::String)?;
            let values: Vec<Value> = cast.str()?.into_iter().map(Value::from).collect();
            schema = schema.attribute(name, AttributeKind::Categorical);
            columns.push(values);
        }
    }

    let schema = schema.build()?;
    let mut builder = Dataset::builder(schema);
    for row in 0..df.height() {
        builder.push_row(
            columns
                .iter()
                .map(|c| c.get(row).cloned().unwrap_or_default()),
        )?;
    }
    Ok(builder.build())
}

/// [`read_frame`] followed by [`dataset_from_frame`].
///
/// # Errors
///
/// See both.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let df = read_frame(path)?;
    dataset_from_frame(&df)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_dtypes_map_to_kinds() -> Result<()> {
        let df = DataFrame::new(vec![
            Column::from(Series::new("age".into(), &[Some(50_i64), None, Some(31)])),
            Column::from(Series::new("mass".into(), &[33.6_f64, 26.6, 23.3])),
            Column::from(Series::new("diabetes".into(), &[Some("pos"), Some("neg"), None])),
            Column::from(Series::new("flag".into(), &[true, false, true])),
        ])?;
        let ds = dataset_from_frame(&df)?;

        assert_eq!(ds.shape(), (3, 4));
        let kinds: Vec<AttributeKind> = ds.schema().attributes().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            [
                AttributeKind::Numeric,
                AttributeKind::Numeric,
                AttributeKind::Categorical,
                AttributeKind::Categorical
            ]
        );
        assert_eq!(ds.numeric("age")?, &[Some(50.0), None, Some(31.0)]);
        assert_eq!(ds.row(2).unwrap()[2], Value::Missing);
        assert_eq!(ds.row(0).unwrap()[3], Value::from("true"));
        Ok(())
    }

    #[test]
    fn test_nan_becomes_missing() -> Result<()> {
        let df = DataFrame::new(vec![Column::from(Series::new(
            "x".into(),
            &[1.0_f64, f64::NAN, 3.0],
        ))])?;
        let ds = dataset_from_frame(&df)?;
        assert_eq!(ds.numeric("x")?, &[Some(1.0), None, Some(3.0)]);
        assert_eq!(ds.column("x")?.missing_count(), 1);
        Ok(())
    }

    #[test]
    fn test_read_csv_with_na() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
        writeln!(file, "glucose,diabetes")?;
        writeln!(file, "148,pos")?;
        writeln!(file, "NA,neg")?;
        writeln!(file, "183,pos")?;
        file.flush()?;

        let ds = load_dataset(file.path())?;
        assert_eq!(ds.shape(), (3, 2));
        assert_eq!(ds.numeric("glucose")?, &[Some(148.0), None, Some(183.0)]);
        assert!(!ds.schema().get("diabetes").unwrap().is_numeric());
        Ok(())
    }

    #[test]
    fn test_read_ndjson() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".ndjson").tempfile()?;
        writeln!(file, r#"{{"a": 1.5, "b": "x"}}"#)?;
        writeln!(file, r#"{{"a": 2.5, "b": "y"}}"#)?;
        file.flush()?;

        let ds = load_dataset(file.path())?;
        assert_eq!(ds.shape(), (2, 2));
        assert_eq!(ds.numeric("a")?, &[Some(1.5), Some(2.5)]);
        Ok(())
    }

    #[test]
    fn test_unsupported_extension() {
        let result = read_frame(Path::new("data.xlsx"));
        assert!(matches!(result, Err(DescryError::DataProcessing(_))));
    }
}
