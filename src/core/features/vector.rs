use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One sample's raw measurements, keyed by feature identifier.
///
/// The map is only ever read through a [`FeatureSchema`](super::FeatureSchema),
/// which fixes the order values are handed to a model in. Iteration order of
/// this type carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: BTreeMap<String, f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(feature.into(), value)
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.values.contains_key(feature)
    }

    pub fn remove(&mut self, feature: &str) -> Option<f64> {
        self.values.remove(feature)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Display-normalized counterpart of a [`FeatureVector`].
///
/// Values are min-max scaled against the reference population and are not
/// clamped: inputs outside the observed range land outside `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScaledVector {
    values: BTreeMap<String, f64>,
}

impl ScaledVector {
    pub(crate) fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Copy with every value clamped into `[0, 1]`, for fixed-range charts.
    pub fn clamped(&self) -> ScaledVector {
        Self {
            values: self
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.clamp(0.0, 1.0)))
                .collect(),
        }
    }

    /// Features whose value falls outside `[0, 1]`.
    pub fn out_of_range(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, v)| !(0.0..=1.0).contains(*v))
            .map(|(k, _)| k.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_and_reports_previous() {
        let mut v = FeatureVector::new();
        assert_eq!(v.insert("radius_mean", 10.0), None);
        assert_eq!(v.insert("radius_mean", 12.5), Some(10.0));
        assert_eq!(v.get("radius_mean"), Some(12.5));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn deserializes_from_plain_json_object() {
        let v: FeatureVector =
            serde_json::from_str(r#"{"radius_mean": 17.5, "texture_mean": 19.2}"#).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.get("texture_mean"), Some(19.2));
    }

    #[test]
    fn clamped_bounds_only_out_of_range_values() {
        let s = ScaledVector::from_pairs([
            ("a".to_string(), -0.25),
            ("b".to_string(), 0.4),
            ("c".to_string(), 1.75),
        ]);
        assert_eq!(s.out_of_range(), vec!["a", "c"]);

        let c = s.clamped();
        assert_eq!(c.get("a"), Some(0.0));
        assert_eq!(c.get("b"), Some(0.4));
        assert_eq!(c.get("c"), Some(1.0));
        assert!(c.out_of_range().is_empty());
    }
}
