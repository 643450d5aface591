use crate::core::{DiagnosisError, Result};
use crate::data::ReferenceDataset;
use crate::statistics::{FeatureStats, StatsTable};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Minimum, maximum and arithmetic mean of every feature.
///
/// Fails with [`DiagnosisError::EmptyDataset`] when the dataset has no rows.
pub fn compute_stats(dataset: &ReferenceDataset) -> Result<StatsTable> {
    if dataset.is_empty() {
        return Err(DiagnosisError::EmptyDataset {
            resource: dataset.source().to_path_buf(),
        });
    }

    let stats = dataset
        .schema()
        .names()
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let column = dataset.column(i).ok_or_else(|| {
                DiagnosisError::data(dataset.source(), format!("no column for '{feature}'"))
            })?;
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            let mut mean = 0.0;
            for (k, v) in column.enumerate() {
                min = min.min(v);
                max = max.max(v);
                // running mean stays finite where a plain sum would overflow
                let k = (k + 1) as f64;
                mean += v / k - mean / k;
            }
            let mean = mean.clamp(min, max);
            Ok(FeatureStats { min, max, mean })
        })
        .collect::<Result<Vec<_>>>()?;

    let table = StatsTable::new(Arc::clone(dataset.schema()), stats);
    let degenerate = table.degenerate_features();
    if !degenerate.is_empty() {
        warn!(features = ?degenerate, "reference dataset has constant features");
    }
    debug!(features = table.len(), rows = dataset.len(), "feature statistics computed");
    Ok(table)
}

/// Owns the reference dataset and its statistics for the process lifetime.
///
/// Statistics are computed on first use and cached; the dataset never changes
/// after load, so the cache is never invalidated.
#[derive(Debug)]
pub struct StatisticsProvider {
    dataset: Arc<ReferenceDataset>,
    stats: OnceLock<StatsTable>,
}

impl StatisticsProvider {
    pub fn new(dataset: Arc<ReferenceDataset>) -> Self {
        Self {
            dataset,
            stats: OnceLock::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<ReferenceDataset> {
        &self.dataset
    }

    pub fn stats(&self) -> Result<&StatsTable> {
        if let Some(stats) = self.stats.get() {
            return Ok(stats);
        }
        let computed = compute_stats(&self.dataset)?;
        Ok(self.stats.get_or_init(|| computed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Diagnosis, FeatureSchema};
    use crate::testing::fixtures;

    fn dataset(rows: Vec<Vec<f64>>) -> ReferenceDataset {
        let schema = Arc::new(FeatureSchema::new("toy/v1", vec!["x1", "x2"]).unwrap());
        let labels = rows.iter().map(|_| Diagnosis::Benign).collect();
        ReferenceDataset::new("mem", schema, rows, labels).unwrap()
    }

    #[test]
    fn min_max_mean_per_feature() {
        let ds = dataset(vec![vec![1.0, 10.0], vec![3.0, -2.0], vec![2.0, 4.0]]);
        let t = compute_stats(&ds).unwrap();
        assert_eq!(
            t.get("x1"),
            Some(&FeatureStats {
                min: 1.0,
                max: 3.0,
                mean: 2.0
            })
        );
        let x2 = t.get("x2").unwrap();
        assert_eq!((x2.min, x2.max), (-2.0, 10.0));
        assert!((x2.mean - 4.0).abs() < 1e-12);
        assert!(t.get("x3").is_none());
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let err = compute_stats(&dataset(vec![])).unwrap_err();
        assert!(matches!(err, DiagnosisError::EmptyDataset { .. }));
    }

    #[test]
    fn constant_column_keeps_mean_within_bounds() {
        let ds = dataset(vec![vec![0.1, 1.0]; 3]);
        let t = compute_stats(&ds).unwrap();
        let s = t.get("x1").unwrap();
        assert!(s.min <= s.mean && s.mean <= s.max);
        assert!(s.is_degenerate());
        assert_eq!(t.degenerate_features(), vec!["x1", "x2"]);
    }

    #[test]
    fn mean_of_huge_values_does_not_overflow() {
        let ds = dataset(vec![vec![1.0e308, 1.0], vec![1.7e308, 3.0]]);
        let x1 = *compute_stats(&ds).unwrap().get("x1").unwrap();
        assert!(x1.mean.is_finite());
        assert!((x1.mean / 1.35e308 - 1.0).abs() < 1e-12, "{}", x1.mean);
        assert!(x1.mean < x1.max);
    }

    #[test]
    fn mean_within_bounds_on_synthetic_population() {
        let ds = fixtures::synthetic_dataset(11, 120);
        let t = compute_stats(&ds).unwrap();
        assert_eq!(t.len(), 30);
        for (feature, s) in t.iter() {
            assert!(s.min <= s.mean && s.mean <= s.max, "{feature}: {s:?}");
        }
    }

    #[test]
    fn provider_caches_the_table() {
        let provider = StatisticsProvider::new(Arc::new(dataset(vec![vec![1.0, 2.0]])));
        let a = provider.stats().unwrap() as *const StatsTable;
        let b = provider.stats().unwrap() as *const StatsTable;
        assert_eq!(a, b);
    }

    #[test]
    fn provider_surfaces_empty_dataset_every_time() {
        let provider = StatisticsProvider::new(Arc::new(dataset(vec![])));
        assert!(provider.stats().is_err());
        assert!(provider.stats().is_err());
    }
}
