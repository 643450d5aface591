use crate::core::FeatureSchema;
use serde::Serialize;
use std::sync::Arc;

/// Observed range and average of one feature over the reference dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl FeatureStats {
    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.range() == 0.0
    }
}

/// Per-feature statistics, indexed like the schema they were computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    schema: Arc<FeatureSchema>,
    stats: Vec<FeatureStats>,
}

impl StatsTable {
    pub(crate) fn new(schema: Arc<FeatureSchema>, stats: Vec<FeatureStats>) -> Self {
        debug_assert_eq!(schema.len(), stats.len());
        Self { schema, stats }
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }

    pub fn get(&self, feature: &str) -> Option<&FeatureStats> {
        self.schema.index_of(feature).map(|i| &self.stats[i])
    }

    pub fn at(&self, index: usize) -> Option<&FeatureStats> {
        self.stats.get(index)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// `(feature, stats)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureStats)> {
        self.schema
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.stats.iter())
    }

    pub fn degenerate_features(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, s)| s.is_degenerate())
            .map(|(f, _)| f)
            .collect()
    }
}
