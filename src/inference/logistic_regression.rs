use crate::core::{DiagnosisError, Result};
use crate::inference::Classifier;
use std::path::{Path, PathBuf};

/// Binary logistic regression with fitted weights.
///
/// `p(classes[1]) = sigmoid(w . x + b)`, `p(classes[0]) = 1 - p(classes[1])`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    source: PathBuf,
    coefficients: Vec<f64>,
    intercept: f64,
    classes: [u8; 2],
}

impl LogisticRegression {
    pub fn new(
        source: impl Into<PathBuf>,
        coefficients: Vec<f64>,
        intercept: f64,
        classes: [u8; 2],
    ) -> Result<Self> {
        let source = source.into();
        if coefficients.is_empty() {
            return Err(DiagnosisError::artifact(source, "no coefficients"));
        }
        if let Some(i) = coefficients.iter().position(|w| !w.is_finite()) {
            return Err(DiagnosisError::artifact(
                source,
                format!("coefficient #{i} is not finite"),
            ));
        }
        if !intercept.is_finite() {
            return Err(DiagnosisError::artifact(source, "intercept is not finite"));
        }
        let mut sorted = classes;
        sorted.sort_unstable();
        if sorted != [0, 1] {
            return Err(DiagnosisError::artifact(
                source,
                format!("classes must be 0 and 1, got {classes:?}"),
            ));
        }
        Ok(Self {
            source,
            coefficients,
            intercept,
            classes,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn decision_function(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.coefficients.len() {
            return Err(DiagnosisError::artifact(
                &self.source,
                format!(
                    "classifier expects {} features, got {}",
                    self.coefficients.len(),
                    input.len()
                ),
            ));
        }
        let z = self
            .coefficients
            .iter()
            .zip(input)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        if z.is_nan() {
            return Err(DiagnosisError::artifact(
                &self.source,
                "decision function is undefined for this input",
            ));
        }
        Ok(z)
    }
}

#[inline]
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl Classifier for LogisticRegression {
    fn source(&self) -> &Path {
        &self.source
    }

    fn input_width(&self) -> usize {
        self.coefficients.len()
    }

    fn classes(&self) -> [u8; 2] {
        self.classes
    }

    fn predict_proba(&self, input: &[f64]) -> Result<[f64; 2]> {
        let p1 = sigmoid(self.decision_function(input)?);
        Ok([1.0 - p1, p1])
    }

    /// `classes[1]` when `z > 0`, otherwise `classes[0]`.
    ///
    /// Decided on `z` rather than on the probabilities, which round to an
    /// even split for `|z|` below the sigmoid's resolution.
    fn predict(&self, input: &[f64]) -> Result<u8> {
        let z = self.decision_function(input)?;
        Ok(if z > 0.0 { self.classes[1] } else { self.classes[0] })
    }
}
