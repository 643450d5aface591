use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiagnosisError>;

/// Failures surfaced by the normalization and inference core.
///
/// Every variant names the resource or feature involved so the caller can
/// diagnose the problem without extra logging. None of them is transient,
/// so nothing in the crate retries on error.
#[derive(Debug, Error)]
pub enum DiagnosisError {
    /// Reference dataset missing, unreadable or malformed.
    #[error("reference dataset {} unavailable: {reason}", .resource.display())]
    DataUnavailable { resource: PathBuf, reason: String },

    /// Reference dataset loaded but holds zero rows.
    #[error("reference dataset {} has no usable rows", .resource.display())]
    EmptyDataset { resource: PathBuf },

    /// Standardizer or classifier missing, corrupt or dimension-incompatible.
    #[error("model artifact {} could not be loaded: {reason}", .resource.display())]
    ArtifactLoad { resource: PathBuf, reason: String },

    /// Feature whose reference range is zero (`max == min`).
    #[error("feature '{feature}' has zero range in the reference dataset")]
    DegenerateFeature { feature: String },

    /// Caller-supplied keys (or values) disagree with the feature schema.
    #[error(
        "feature vector does not match schema '{schema_version}': {}",
        describe_mismatch(.missing, .unexpected, .non_finite)
    )]
    SchemaMismatch {
        schema_version: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
        non_finite: Vec<String>,
    },
}

impl DiagnosisError {
    pub(crate) fn artifact(resource: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DiagnosisError::ArtifactLoad {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn data(resource: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DiagnosisError::DataUnavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

fn describe_mismatch(missing: &[String], unexpected: &[String], non_finite: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing [{}]", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        parts.push(format!("unexpected [{}]", unexpected.join(", ")));
    }
    if !non_finite.is_empty() {
        parts.push(format!("non-finite [{}]", non_finite.join(", ")));
    }
    if parts.is_empty() {
        "feature order differs".to_string()
    } else {
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_lists_offending_keys() {
        let err = DiagnosisError::SchemaMismatch {
            schema_version: "wdbc-30/v1".into(),
            missing: vec!["radius_mean".into()],
            unexpected: vec!["id".into(), "extra".into()],
            non_finite: vec![],
        };
        let msg = err.to_string();
        assert!(msg.contains("wdbc-30/v1"));
        assert!(msg.contains("missing [radius_mean]"));
        assert!(msg.contains("unexpected [id, extra]"));
        assert!(!msg.contains("non-finite"));
    }

    #[test]
    fn resource_errors_name_the_path() {
        let err = DiagnosisError::artifact("model/scaler.json", "no such file");
        assert_eq!(
            err.to_string(),
            "model artifact model/scaler.json could not be loaded: no such file"
        );
        let err = DiagnosisError::EmptyDataset {
            resource: "data/data.csv".into(),
        };
        assert!(err.to_string().contains("data/data.csv"));
    }
}
