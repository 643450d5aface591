use crate::core::error::{DiagnosisError, Result};
use crate::core::features::measurement::{feature_id, grid};
use crate::core::features::vector::FeatureVector;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

/// Version tag of the 30-feature breast cancer Wisconsin (diagnostic) layout.
pub const WDBC_SCHEMA_VERSION: &str = "wdbc-30/v1";

static WDBC: LazyLock<Arc<FeatureSchema>> = LazyLock::new(|| {
    let names = grid().map(|(m, g)| feature_id(m, g)).collect();
    Arc::new(FeatureSchema::from_unique(WDBC_SCHEMA_VERSION.into(), names))
});

/// Ordered, versioned list of feature identifiers.
///
/// The order is the one fitted artifacts expect their input columns in. All
/// conversions from a [`FeatureVector`] to a numeric array go through
/// [`FeatureSchema::materialize`], never through map iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    version: String,
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Builds a schema; duplicated identifiers are rejected.
    pub fn new<S: Into<String>>(version: impl Into<String>, names: Vec<S>) -> Result<Self> {
        let version = version.into();
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        let duplicates: Vec<String> = names
            .iter()
            .filter(|n| !seen.insert(n.as_str()))
            .cloned()
            .collect();
        if !duplicates.is_empty() {
            return Err(DiagnosisError::SchemaMismatch {
                schema_version: version,
                missing: Vec::new(),
                unexpected: duplicates,
                non_finite: Vec::new(),
            });
        }
        Ok(Self::from_unique(version, names))
    }

    fn from_unique(version: String, names: Vec<String>) -> Self {
        let positions = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        Self {
            version,
            names,
            positions,
        }
    }

    /// Shared 30-feature layout: all `_mean`, then `_se`, then `_worst`.
    pub fn wdbc() -> Arc<FeatureSchema> {
        Arc::clone(&WDBC)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, feature: &str) -> Option<usize> {
        self.positions.get(feature).copied()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.positions.contains_key(feature)
    }

    /// Rejects vectors with missing keys, unknown keys or non-finite values.
    pub fn validate(&self, vector: &FeatureVector) -> Result<()> {
        let missing: Vec<String> = self
            .names
            .iter()
            .filter(|n| !vector.contains(n))
            .cloned()
            .collect();
        let unexpected: Vec<String> = vector
            .keys()
            .filter(|k| !self.contains(k))
            .map(str::to_string)
            .collect();
        let non_finite: Vec<String> = vector
            .iter()
            .filter(|(k, v)| self.contains(k) && !v.is_finite())
            .map(|(k, _)| k.to_string())
            .collect();

        if missing.is_empty() && unexpected.is_empty() && non_finite.is_empty() {
            Ok(())
        } else {
            Err(DiagnosisError::SchemaMismatch {
                schema_version: self.version.clone(),
                missing,
                unexpected,
                non_finite,
            })
        }
    }

    /// Validated values laid out in schema order.
    pub fn materialize(&self, vector: &FeatureVector) -> Result<Vec<f64>> {
        self.validate(vector)?;
        Ok(self
            .names
            .iter()
            .filter_map(|n| vector.get(n))
            .collect())
    }

    /// Inverse of [`materialize`](Self::materialize) for values already in schema order.
    pub fn vector_from_values(&self, values: &[f64]) -> Result<FeatureVector> {
        if values.len() != self.len() {
            return Err(DiagnosisError::SchemaMismatch {
                schema_version: self.version.clone(),
                missing: self.names.iter().skip(values.len()).cloned().collect(),
                unexpected: (self.len()..values.len()).map(|i| format!("[{i}]")).collect(),
                non_finite: Vec::new(),
            });
        }
        Ok(self
            .names
            .iter()
            .cloned()
            .zip(values.iter().copied())
            .collect())
    }

    /// Compares an externally declared column list against this schema.
    ///
    /// Returns a description of the first disagreement, order included.
    pub fn check_names(&self, declared: &[String]) -> std::result::Result<(), String> {
        if declared.len() != self.len() {
            return Err(format!(
                "declares {} features, schema '{}' has {}",
                declared.len(),
                self.version,
                self.len()
            ));
        }
        match self
            .names
            .iter()
            .zip(declared)
            .position(|(expected, got)| expected != got)
        {
            None => Ok(()),
            Some(i) => Err(format!(
                "feature #{i} is '{}', schema '{}' expects '{}'",
                declared[i], self.version, self.names[i]
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> FeatureSchema {
        FeatureSchema::new("toy/v1", vec!["b", "a"]).unwrap()
    }

    #[test]
    fn wdbc_layout() {
        let s = FeatureSchema::wdbc();
        assert_eq!(s.len(), 30);
        assert_eq!(s.version(), WDBC_SCHEMA_VERSION);
        assert_eq!(s.index_of("radius_mean"), Some(0));
        assert_eq!(s.index_of("concave points_mean"), Some(7));
        assert_eq!(s.index_of("radius_se"), Some(10));
        assert_eq!(s.index_of("fractal_dimension_worst"), Some(29));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = FeatureSchema::new("dup", vec!["a", "b", "a"]).unwrap_err();
        match err {
            DiagnosisError::SchemaMismatch { unexpected, .. } => {
                assert_eq!(unexpected, vec!["a".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn materialize_follows_schema_not_key_order() {
        let s = toy();
        let v: FeatureVector = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(s.materialize(&v).unwrap(), vec![2.0, 1.0]);
    }

    #[test]
    fn validate_reports_missing_extra_and_non_finite() {
        let s = toy();
        let v: FeatureVector = [("a", f64::NAN), ("c", 1.0)].into_iter().collect();
        match s.validate(&v).unwrap_err() {
            DiagnosisError::SchemaMismatch {
                missing,
                unexpected,
                non_finite,
                ..
            } => {
                assert_eq!(missing, vec!["b".to_string()]);
                assert_eq!(unexpected, vec!["c".to_string()]);
                assert_eq!(non_finite, vec!["a".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn vector_from_values_checks_width() {
        let s = toy();
        let v = s.vector_from_values(&[3.0, 4.0]).unwrap();
        assert_eq!(v.get("b"), Some(3.0));
        assert_eq!(v.get("a"), Some(4.0));
        assert!(s.vector_from_values(&[3.0]).is_err());
        assert!(s.vector_from_values(&[3.0, 4.0, 5.0]).is_err());
    }

    #[test]
    fn check_names_catches_reordering() {
        let s = toy();
        assert!(s.check_names(&["b".into(), "a".into()]).is_ok());
        let err = s.check_names(&["a".into(), "b".into()]).unwrap_err();
        assert!(err.contains("feature #0 is 'a'"));
        assert!(s.check_names(&["b".into()]).is_err());
    }
}
