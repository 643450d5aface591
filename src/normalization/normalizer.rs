use crate::core::{DiagnosisError, FeatureVector, Result, ScaledVector};
use crate::normalization::DegeneratePolicy;
use crate::statistics::StatsTable;
use tracing::debug;

/// Value reported for a zero-range feature under [`DegeneratePolicy::Midpoint`].
pub const DEGENERATE_MIDPOINT: f64 = 0.5;

/// Min-max scaler for display purposes.
///
/// `scaled = (value - min) / (max - min)` against the reference population.
/// Results are not clamped; see [`ScaledVector::clamped`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    policy: DegeneratePolicy,
}

impl Normalizer {
    pub fn new(policy: DegeneratePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    pub fn normalize(&self, vector: &FeatureVector, stats: &StatsTable) -> Result<ScaledVector> {
        let schema = stats.schema();
        let values = schema.materialize(vector)?;

        let mut scaled = Vec::with_capacity(values.len());
        for ((feature, s), value) in stats.iter().zip(values) {
            let v = if s.is_degenerate() {
                match self.policy {
                    DegeneratePolicy::Midpoint => {
                        debug!(feature, "zero-range feature placed at midpoint");
                        DEGENERATE_MIDPOINT
                    }
                    DegeneratePolicy::Reject => {
                        return Err(DiagnosisError::DegenerateFeature {
                            feature: feature.to_string(),
                        });
                    }
                }
            } else {
                (value - s.min) / s.range()
            };
            scaled.push((feature.to_string(), v));
        }
        Ok(ScaledVector::from_pairs(scaled))
    }
}

/// [`Normalizer::normalize`] with the default [`DegeneratePolicy`].
pub fn normalize(vector: &FeatureVector, stats: &StatsTable) -> Result<ScaledVector> {
    Normalizer::default().normalize(vector, stats)
}
