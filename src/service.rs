use crate::config::AppConfig;
use crate::core::{
    DiagnosisError, FeatureSchema, FeatureVector, PredictionResult, Result, ScaledVector,
};
use crate::data::load_reference_dataset;
use crate::inference::{InferencePipeline, ModelArtifact};
use crate::normalization::Normalizer;
use crate::presentation::{SliderSpec, slider_specs};
use crate::statistics::{StatisticsProvider, StatsTable};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Display-normalized vector plus the model verdict for one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub scaled: ScaledVector,
    pub prediction: PredictionResult,
}

/// Caller-facing entry point tying statistics, normalization and inference together.
///
/// All shared state is read-only; a failed request leaves nothing behind.
#[derive(Debug)]
pub struct DiagnosisService {
    statistics: StatisticsProvider,
    pipeline: InferencePipeline,
    normalizer: Normalizer,
}

impl DiagnosisService {
    /// Wires the components, checking that both sides agree on the feature schema.
    ///
    /// Statistics are computed here, so an empty reference dataset fails at startup.
    pub fn new(
        statistics: StatisticsProvider,
        pipeline: InferencePipeline,
        normalizer: Normalizer,
    ) -> Result<Self> {
        let stats_schema = statistics.dataset().schema();
        if let Err(reason) = pipeline.schema().check_names(stats_schema.names()) {
            return Err(DiagnosisError::data(
                statistics.dataset().source(),
                format!("reference columns disagree with model artifact: {reason}"),
            ));
        }
        statistics.stats()?;
        Ok(Self {
            statistics,
            pipeline,
            normalizer,
        })
    }

    /// Loads dataset and artifact from the configured locations.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let schema = FeatureSchema::wdbc();
        let dataset = load_reference_dataset(&config.dataset_path, Arc::clone(&schema))?;
        let artifact = ModelArtifact::load(schema, &config.model_path, &config.scaler_path)?;

        let service = Self::new(
            StatisticsProvider::new(Arc::new(dataset)),
            InferencePipeline::new(Arc::new(artifact)),
            Normalizer::new(config.degenerate_policy),
        )?;
        info!(policy = %config.degenerate_policy, "diagnosis service ready");
        Ok(service)
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        self.pipeline.schema()
    }

    pub fn stats(&self) -> Result<&StatsTable> {
        self.statistics.stats()
    }

    pub fn statistics(&self) -> &StatisticsProvider {
        &self.statistics
    }

    pub fn sliders(&self) -> Result<Vec<SliderSpec>> {
        Ok(slider_specs(self.stats()?))
    }

    /// Vector holding the reference mean of every feature.
    pub fn mean_vector(&self) -> Result<FeatureVector> {
        Ok(self
            .stats()?
            .iter()
            .map(|(feature, s)| (feature, s.mean))
            .collect())
    }

    pub fn normalize(&self, vector: &FeatureVector) -> Result<ScaledVector> {
        self.normalizer.normalize(vector, self.stats()?)
    }

    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult> {
        self.pipeline.predict(vector)
    }

    pub fn assess(&self, vector: &FeatureVector) -> Result<Assessment> {
        let scaled = self.normalize(vector)?;
        let prediction = self.predict(vector)?;
        let outside = scaled.out_of_range();
        if !outside.is_empty() {
            debug!(features = ?outside, "sample lies outside the reference range");
        }
        Ok(Assessment { scaled, prediction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Diagnosis;
    use crate::data::ReferenceDataset;
    use crate::inference::{LogisticRegression, StandardScaler};
    use crate::normalization::DegeneratePolicy;
    use crate::testing::fixtures;

    fn service(dataset: ReferenceDataset) -> DiagnosisService {
        let artifact = fixtures::wdbc_artifact(&dataset);
        DiagnosisService::new(
            StatisticsProvider::new(Arc::new(dataset)),
            InferencePipeline::new(Arc::new(artifact)),
            Normalizer::default(),
        )
        .unwrap()
    }

    #[test]
    fn assess_returns_scaled_vector_and_prediction() {
        let svc = service(fixtures::synthetic_dataset(21, 150));
        let v = svc.mean_vector().unwrap();
        let a = svc.assess(&v).unwrap();
        assert_eq!(a.scaled.len(), 30);
        assert!(a.scaled.out_of_range().is_empty());
        let p = a.prediction;
        assert!((p.probability_benign + p.probability_malignant - 1.0).abs() < 1e-9);
    }

    #[test]
    fn extreme_samples_get_opposite_verdicts() {
        let svc = service(fixtures::synthetic_dataset(4, 150));
        let stats = svc.stats().unwrap();
        let low: FeatureVector = stats.iter().map(|(f, s)| (f, s.min)).collect();
        let high: FeatureVector = stats.iter().map(|(f, s)| (f, s.max)).collect();
        assert_eq!(svc.predict(&low).unwrap().label, Diagnosis::Benign);
        assert_eq!(svc.predict(&high).unwrap().label, Diagnosis::Malignant);
    }

    #[test]
    fn stats_and_scaler_agree_on_shared_fixture() {
        let dataset = fixtures::synthetic_dataset(8, 90);
        let scaler = fixtures::fit_standard_scaler(&dataset);
        let svc = service(dataset);
        for ((feature, s), fitted) in svc.stats().unwrap().iter().zip(scaler.mean()) {
            assert!((s.mean - fitted).abs() < 1e-9, "{feature}: {} vs {fitted}", s.mean);
        }
    }

    #[test]
    fn schema_mismatch_between_components_fails_startup() {
        let dataset = fixtures::synthetic_dataset(1, 10);
        let schema = fixtures::toy_schema();
        let artifact = ModelArtifact::new(
            schema,
            Box::new(StandardScaler::new("mem", vec![0.0; 2], vec![1.0; 2]).unwrap()),
            Box::new(LogisticRegression::new("mem", vec![1.0; 2], 0.0, [0, 1]).unwrap()),
        )
        .unwrap();
        let err = DiagnosisService::new(
            StatisticsProvider::new(Arc::new(dataset)),
            InferencePipeline::new(Arc::new(artifact)),
            Normalizer::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("disagree with model artifact"));
    }

    #[test]
    fn empty_dataset_fails_startup() {
        let empty =
            ReferenceDataset::new("empty.csv", FeatureSchema::wdbc(), vec![], vec![]).unwrap();
        let artifact = fixtures::wdbc_artifact(&fixtures::synthetic_dataset(2, 20));
        let err = DiagnosisService::new(
            StatisticsProvider::new(Arc::new(empty)),
            InferencePipeline::new(Arc::new(artifact)),
            Normalizer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DiagnosisError::EmptyDataset { .. }));
    }

    #[test]
    fn bad_request_leaves_service_usable() {
        let svc = service(fixtures::synthetic_dataset(6, 60));
        let mut v = svc.mean_vector().unwrap();
        v.insert("id", 1.0);
        assert!(matches!(
            svc.assess(&v),
            Err(DiagnosisError::SchemaMismatch { .. })
        ));
        v.remove("id");
        assert!(svc.assess(&v).is_ok());
    }

    #[test]
    fn from_config_loads_everything_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = fixtures::synthetic_dataset(13, 60);
        let config = AppConfig {
            dataset_path: fixtures::write_dataset_csv(dir.path(), &dataset),
            degenerate_policy: DegeneratePolicy::Reject,
            ..fixtures::write_wdbc_artifacts(dir.path(), &dataset)
        };
        let svc = DiagnosisService::from_config(&config).unwrap();
        assert_eq!(svc.schema().len(), 30);
        assert_eq!(svc.sliders().unwrap().len(), 30);
        assert!(svc.assess(&svc.mean_vector().unwrap()).is_ok());
    }

    #[test]
    fn from_config_reports_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            dataset_path: dir.path().join("missing.csv"),
            ..AppConfig::default()
        };
        assert!(matches!(
            DiagnosisService::from_config(&config),
            Err(DiagnosisError::DataUnavailable { .. })
        ));
    }
}
