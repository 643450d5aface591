use crate::core::{Diagnosis, DiagnosisError, FeatureSchema, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable table of historical samples used for display statistics.
///
/// Rows hold one value per schema feature, in schema order. The table is
/// never mutated after construction and is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    source: PathBuf,
    schema: Arc<FeatureSchema>,
    rows: Vec<Vec<f64>>,
    labels: Vec<Diagnosis>,
}

impl ReferenceDataset {
    pub fn new(
        source: impl Into<PathBuf>,
        schema: Arc<FeatureSchema>,
        rows: Vec<Vec<f64>>,
        labels: Vec<Diagnosis>,
    ) -> Result<Self> {
        let source = source.into();
        if rows.len() != labels.len() {
            return Err(DiagnosisError::data(
                source,
                format!("{} rows but {} labels", rows.len(), labels.len()),
            ));
        }
        if let Some(i) = rows.iter().position(|r| r.len() != schema.len()) {
            return Err(DiagnosisError::data(
                source,
                format!(
                    "row {i} has {} values, schema '{}' has {}",
                    rows[i].len(),
                    schema.version(),
                    schema.len()
                ),
            ));
        }
        Ok(Self {
            source,
            schema,
            rows,
            labels,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn labels(&self) -> &[Diagnosis] {
        &self.labels
    }

    /// Values of the feature at schema position `index`, one per row.
    pub fn column(&self, index: usize) -> Option<impl Iterator<Item = f64> + '_> {
        (index < self.schema.len()).then(|| self.rows.iter().map(move |r| r[index]))
    }

    /// `(benign, malignant)` row counts.
    pub fn class_counts(&self) -> (usize, usize) {
        let malignant = self
            .labels
            .iter()
            .filter(|l| **l == Diagnosis::Malignant)
            .count();
        (self.labels.len() - malignant, malignant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Arc<FeatureSchema> {
        Arc::new(FeatureSchema::new("toy/v1", vec!["x1", "x2"]).unwrap())
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = ReferenceDataset::new(
            "mem",
            schema(),
            vec![vec![1.0, 2.0], vec![3.0]],
            vec![Diagnosis::Benign, Diagnosis::Malignant],
        )
        .unwrap_err();
        assert!(matches!(err, DiagnosisError::DataUnavailable { .. }));
        assert!(err.to_string().contains("row 1 has 1 values"));
    }

    #[test]
    fn rejects_label_count_mismatch() {
        let err = ReferenceDataset::new("mem", schema(), vec![vec![1.0, 2.0]], vec![]).unwrap_err();
        assert!(matches!(err, DiagnosisError::DataUnavailable { .. }));
    }

    #[test]
    fn columns_and_class_counts() {
        let ds = ReferenceDataset::new(
            "mem",
            schema(),
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![Diagnosis::Benign, Diagnosis::Malignant, Diagnosis::Malignant],
        )
        .unwrap();
        assert_eq!(ds.column(1).unwrap().collect::<Vec<_>>(), vec![2.0, 4.0, 6.0]);
        assert!(ds.column(2).is_none());
        assert_eq!(ds.class_counts(), (1, 2));
        assert_eq!(ds.source(), Path::new("mem"));
    }
}
