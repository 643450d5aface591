use crate::core::{
    Diagnosis, DiagnosisError, FeatureSchema, FeatureVector, PredictionResult, Result,
};
use crate::inference::ModelArtifact;
use std::sync::Arc;
use tracing::debug;

/// Standardize-then-classify over a shared, read-only [`ModelArtifact`].
#[derive(Debug, Clone)]
pub struct InferencePipeline {
    artifact: Arc<ModelArtifact>,
}

impl InferencePipeline {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self { artifact }
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        self.artifact.schema()
    }

    pub fn artifact(&self) -> &Arc<ModelArtifact> {
        &self.artifact
    }

    /// Classifies one sample.
    ///
    /// The vector must hold exactly the schema's features. The label is the
    /// classifier's own prediction; probabilities are attached to diagnoses
    /// through its declared class codes, not by column position.
    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult> {
        let raw = self.schema().materialize(vector)?;
        let standardized = self.artifact.standardizer().transform(&raw)?;

        let classifier = self.artifact.classifier();
        let proba = classifier.predict_proba(&standardized)?;

        let mut benign = None;
        let mut malignant = None;
        for (code, p) in classifier.classes().into_iter().zip(proba) {
            match Diagnosis::from_class_code(code) {
                Some(Diagnosis::Benign) => benign = Some(p),
                Some(Diagnosis::Malignant) => malignant = Some(p),
                None => {
                    return Err(DiagnosisError::artifact(
                        classifier.source(),
                        format!("unknown class code {code}"),
                    ));
                }
            }
        }
        let (Some(benign), Some(malignant)) = (benign, malignant) else {
            return Err(DiagnosisError::artifact(
                classifier.source(),
                "classifier does not report both benign and malignant",
            ));
        };

        let code = classifier.predict(&standardized)?;
        let label = Diagnosis::from_class_code(code).ok_or_else(|| {
            DiagnosisError::artifact(classifier.source(), format!("unknown class code {code}"))
        })?;

        let result = PredictionResult::new(label, benign, malignant);
        debug!(
            label = %result.label,
            probability_benign = result.probability_benign,
            probability_malignant = result.probability_malignant,
            "sample classified"
        );
        Ok(result)
    }
}
