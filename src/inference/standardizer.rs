use crate::core::{DiagnosisError, Result};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Fitted per-feature transform applied before classification.
pub trait Standardizer: Debug + Send + Sync {
    /// Resource the fitted parameters were read from.
    fn source(&self) -> &Path;

    fn input_width(&self) -> usize;

    fn transform(&self, input: &[f64]) -> Result<Vec<f64>>;
}

/// Zero-mean, unit-variance scaling with pre-fitted parameters.
///
/// `z = (x - mean) / scale`. A zero scale (constant training column) is
/// treated as `1`, matching how fitted scalers store such columns.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    source: PathBuf,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(source: impl Into<PathBuf>, mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let source = source.into();
        if mean.len() != scale.len() {
            return Err(DiagnosisError::artifact(
                source,
                format!("{} means but {} scales", mean.len(), scale.len()),
            ));
        }
        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(DiagnosisError::artifact(source, format!("mean #{i} is not finite")));
        }
        if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s < 0.0) {
            return Err(DiagnosisError::artifact(
                source,
                format!("scale #{i} must be finite and non-negative"),
            ));
        }
        Ok(Self {
            source,
            mean,
            scale,
        })
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }
}

impl Standardizer for StandardScaler {
    fn source(&self) -> &Path {
        &self.source
    }

    fn input_width(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_width() {
            return Err(DiagnosisError::artifact(
                &self.source,
                format!(
                    "standardizer expects {} features, got {}",
                    self.input_width(),
                    input.len()
                ),
            ));
        }
        Ok(input
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| {
                let s = if *s == 0.0 { 1.0 } else { *s };
                (x - m) / s
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn transform_centers_and_scales() {
        let s = StandardScaler::new("mem", vec![1.0, 10.0], vec![2.0, 5.0]).unwrap();
        let z = s.transform(&[3.0, 0.0]).unwrap();
        assert!((z[0] - 1.0).abs() < EPS);
        assert!((z[1] + 2.0).abs() < EPS);
    }

    #[test]
    fn zero_scale_only_centers() {
        let s = StandardScaler::new("mem", vec![4.0], vec![0.0]).unwrap();
        assert_eq!(s.transform(&[6.5]).unwrap(), vec![2.5]);
    }

    #[test]
    fn width_mismatch_is_artifact_error() {
        let s = StandardScaler::new("scaler.json", vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
        let err = s.transform(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, DiagnosisError::ArtifactLoad { .. }));
        assert!(err.to_string().contains("scaler.json"));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(StandardScaler::new("mem", vec![0.0], vec![1.0, 1.0]).is_err());
        assert!(StandardScaler::new("mem", vec![f64::NAN], vec![1.0]).is_err());
        assert!(StandardScaler::new("mem", vec![0.0], vec![-1.0]).is_err());
        assert!(StandardScaler::new("mem", vec![0.0], vec![f64::INFINITY]).is_err());
    }
}
