use crate::core::{DiagnosisError, FeatureSchema, Result};
use crate::inference::{Classifier, LogisticRegression, StandardScaler, Standardizer};
use schemars::{JsonSchema, Schema, schema_for};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_pickle::DeOptions;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

/// On-disk form of a fitted standard scaler.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StandardizerDocument {
    /// Column names the scaler was fit on, in fit order.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// Fitted per-feature mean.
    pub mean: Vec<f64>,
    /// Fitted per-feature standard deviation.
    pub scale: Vec<f64>,
}

/// On-disk form of a fitted classifier.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ClassifierDocument {
    LogisticRegression {
        /// Column names the model was fit on, in fit order.
        #[serde(default)]
        feature_names: Option<Vec<String>>,
        coefficients: Vec<f64>,
        intercept: f64,
        /// Class codes in probability-column order.
        #[serde(default = "default_classes")]
        classes: Vec<i64>,
    },
}

/// Serialization used for an artifact file, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Pickle,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pkl") || ext.eq_ignore_ascii_case("pickle") => {
                ArtifactFormat::Pickle
            }
            _ => ArtifactFormat::Json,
        }
    }
}

/// JSON Schemas of the two artifact documents, keyed by role.
pub fn artifact_schemas() -> [(&'static str, Schema); 2] {
    [
        ("scaler", schema_for!(StandardizerDocument)),
        ("model", schema_for!(ClassifierDocument)),
    ]
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| DiagnosisError::artifact(path, e.to_string()))?;
    let reader = BufReader::new(file);
    match ArtifactFormat::from_path(path) {
        ArtifactFormat::Json => {
            serde_json::from_reader(reader).map_err(|e| DiagnosisError::artifact(path, e.to_string()))
        }
        ArtifactFormat::Pickle => serde_pickle::from_reader(reader, DeOptions::new())
            .map_err(|e| DiagnosisError::artifact(path, e.to_string())),
    }
}

fn check_declared_names(
    schema: &FeatureSchema,
    declared: Option<&Vec<String>>,
    source: &Path,
) -> Result<()> {
    match declared {
        Some(names) => schema
            .check_names(names)
            .map_err(|reason| DiagnosisError::artifact(source, reason)),
        None => Ok(()),
    }
}

impl StandardizerDocument {
    pub fn into_standardizer(self, schema: &FeatureSchema, source: &Path) -> Result<StandardScaler> {
        check_declared_names(schema, self.feature_names.as_ref(), source)?;
        StandardScaler::new(source, self.mean, self.scale)
    }
}

impl ClassifierDocument {
    pub fn into_classifier(self, schema: &FeatureSchema, source: &Path) -> Result<Box<dyn Classifier>> {
        match self {
            ClassifierDocument::LogisticRegression {
                feature_names,
                coefficients,
                intercept,
                classes,
            } => {
                check_declared_names(schema, feature_names.as_ref(), source)?;
                let classes = class_pair(&classes).ok_or_else(|| {
                    DiagnosisError::artifact(source, format!("classes must be 0 and 1, got {classes:?}"))
                })?;
                Ok(Box::new(LogisticRegression::new(
                    source,
                    coefficients,
                    intercept,
                    classes,
                )?))
            }
        }
    }
}

fn class_pair(classes: &[i64]) -> Option<[u8; 2]> {
    match classes {
        [a, b] => Some([u8::try_from(*a).ok()?, u8::try_from(*b).ok()?]),
        _ => None,
    }
}

/// Pre-fitted standardizer and classifier bound to one feature schema.
///
/// Loaded once per process and shared read-only behind an `Arc`.
#[derive(Debug)]
pub struct ModelArtifact {
    schema: Arc<FeatureSchema>,
    standardizer: Box<dyn Standardizer>,
    classifier: Box<dyn Classifier>,
}

impl ModelArtifact {
    /// Binds the components, rejecting width disagreements with the schema.
    pub fn new(
        schema: Arc<FeatureSchema>,
        standardizer: Box<dyn Standardizer>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self> {
        if standardizer.input_width() != schema.len() {
            return Err(DiagnosisError::artifact(
                standardizer.source(),
                format!(
                    "standardizer is {} features wide, schema '{}' has {}",
                    standardizer.input_width(),
                    schema.version(),
                    schema.len()
                ),
            ));
        }
        if classifier.input_width() != schema.len() {
            return Err(DiagnosisError::artifact(
                classifier.source(),
                format!(
                    "classifier is {} features wide, schema '{}' has {}",
                    classifier.input_width(),
                    schema.version(),
                    schema.len()
                ),
            ));
        }
        Ok(Self {
            schema,
            standardizer,
            classifier,
        })
    }

    /// Reads both artifact files; `.pkl`/`.pickle` are decoded as pickles, anything else as JSON.
    pub fn load(schema: Arc<FeatureSchema>, model_path: &Path, scaler_path: &Path) -> Result<Self> {
        let scaler: StandardizerDocument = read_document(scaler_path)?;
        let standardizer = scaler.into_standardizer(&schema, scaler_path)?;

        let model: ClassifierDocument = read_document(model_path)?;
        let classifier = model.into_classifier(&schema, model_path)?;

        let artifact = Self::new(schema, Box::new(standardizer), classifier)?;
        info!(
            model = %model_path.display(),
            scaler = %scaler_path.display(),
            schema = artifact.schema.version(),
            "model artifact loaded"
        );
        Ok(artifact)
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }

    pub fn standardizer(&self) -> &dyn Standardizer {
        self.standardizer.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}
