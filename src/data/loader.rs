use crate::core::{Diagnosis, DiagnosisError, FeatureSchema, Result};
use crate::data::ReferenceDataset;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Name of the categorical label column in the reference dataset.
pub const LABEL_COLUMN: &str = "diagnosis";

/// Loads the reference dataset from a CSV file with a header row.
///
/// Columns that are neither schema features nor [`LABEL_COLUMN`] (an `id`
/// column, an empty trailing column, ...) are discarded. Labels `M`/`B` are
/// mapped to [`Diagnosis::Malignant`]/[`Diagnosis::Benign`].
pub fn load_reference_dataset(path: &Path, schema: Arc<FeatureSchema>) -> Result<ReferenceDataset> {
    let file = File::open(path).map_err(|e| DiagnosisError::data(path, e.to_string()))?;
    let dataset = read_reference_dataset(file, path, schema)?;
    let (benign, malignant) = dataset.class_counts();
    info!(
        path = %path.display(),
        rows = dataset.len(),
        benign,
        malignant,
        "reference dataset loaded"
    );
    Ok(dataset)
}

/// Same as [`load_reference_dataset`] over any reader; `source` only names it in errors.
pub fn read_reference_dataset<R: Read>(
    reader: R,
    source: &Path,
    schema: Arc<FeatureSchema>,
) -> Result<ReferenceDataset> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| DiagnosisError::data(source, e.to_string()))?
        .clone();
    let (feature_columns, label_column) = resolve_columns(&headers, &schema, source)?;
    debug!(
        kept = feature_columns.len() + 1,
        dropped = headers.len().saturating_sub(feature_columns.len() + 1),
        "resolved reference dataset columns"
    );

    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (line, record) in csv.records().enumerate() {
        let record = record.map_err(|e| DiagnosisError::data(source, e.to_string()))?;
        // header is line 1
        let line = line + 2;

        let label = record.get(label_column).unwrap_or_default();
        let diagnosis = Diagnosis::from_label(label).ok_or_else(|| {
            DiagnosisError::data(
                source,
                format!("line {line}: unrecognized {LABEL_COLUMN} '{label}', expected M or B"),
            )
        })?;

        let mut row = Vec::with_capacity(feature_columns.len());
        for (feature, &col) in schema.names().iter().zip(&feature_columns) {
            row.push(parse_cell(&record, col, feature, line, source)?);
        }
        rows.push(row);
        labels.push(diagnosis);
    }

    ReferenceDataset::new(source, schema, rows, labels)
}

fn resolve_columns(
    headers: &StringRecord,
    schema: &FeatureSchema,
    source: &Path,
) -> Result<(Vec<usize>, usize)> {
    let position = |name: &str| headers.iter().position(|h| h == name);

    let mut missing = Vec::new();
    let mut columns = Vec::with_capacity(schema.len());
    for name in schema.names() {
        match position(name) {
            Some(i) => columns.push(i),
            None => missing.push(name.as_str()),
        }
    }
    let label = position(LABEL_COLUMN);
    if label.is_none() {
        missing.push(LABEL_COLUMN);
    }

    match label {
        Some(label) if missing.is_empty() => Ok((columns, label)),
        _ => Err(DiagnosisError::data(
            source,
            format!("missing columns [{}]", missing.join(", ")),
        )),
    }
}

fn parse_cell(
    record: &StringRecord,
    column: usize,
    feature: &str,
    line: usize,
    source: &Path,
) -> Result<f64> {
    let raw = record.get(column).unwrap_or_default();
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DiagnosisError::data(
            source,
            format!("line {line}: '{feature}' is not a finite number ('{raw}')"),
        )),
    }
}
