use crate::config::AppConfig;
use crate::core::{Diagnosis, FeatureSchema, FeatureVector};
use crate::data::ReferenceDataset;
use crate::inference::{
    ClassifierDocument, LogisticRegression, ModelArtifact, StandardScaler, StandardizerDocument,
};
use crate::statistics::StatsTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const MALIGNANT_SHARE: f64 = 0.37;

pub fn toy_schema() -> Arc<FeatureSchema> {
    Arc::new(FeatureSchema::new("toy/v1", vec!["x1", "x2"]).unwrap())
}

/// Writes `model.json` / `scaler.json` for the two-feature toy schema.
///
/// Identity scaler and `z = x1 - x2`, so `x1 == x2` sits on the decision boundary.
pub fn write_toy_artifacts(dir: &Path) -> (PathBuf, PathBuf) {
    let model = dir.join("model.json");
    let scaler = dir.join("scaler.json");
    fs::write(
        &model,
        br#"{"kind": "logistic-regression", "feature_names": ["x1", "x2"],
            "coefficients": [1.0, -1.0], "intercept": 0.0, "classes": [0, 1]}"#,
    )
    .unwrap();
    fs::write(
        &scaler,
        br#"{"feature_names": ["x1", "x2"], "mean": [0.0, 0.0], "scale": [1.0, 1.0]}"#,
    )
    .unwrap();
    (model, scaler)
}

fn feature_range(index: usize) -> (f64, f64) {
    let lo = 0.05 + index as f64 * 0.4;
    (lo, lo * 3.0 + 1.0)
}

/// Seeded population on the 30-feature schema with two overlapping classes.
///
/// Benign rows sit in the lower 55% of every feature's range, malignant rows
/// in the upper 55%, so a model summing standardized features separates them.
pub fn synthetic_dataset(seed: u64, rows: usize) -> ReferenceDataset {
    let schema = FeatureSchema::wdbc();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values = Vec::with_capacity(rows);
    let mut labels = Vec::with_capacity(rows);

    for _ in 0..rows {
        let label = if rng.random_bool(MALIGNANT_SHARE) {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        };
        let row = (0..schema.len())
            .map(|i| {
                let (lo, hi) = feature_range(i);
                let span = hi - lo;
                match label {
                    Diagnosis::Benign => rng.random_range(lo..=lo + 0.55 * span),
                    Diagnosis::Malignant => rng.random_range(lo + 0.45 * span..=hi),
                }
            })
            .collect();
        values.push(row);
        labels.push(label);
    }
    ReferenceDataset::new(format!("synthetic-{seed}.csv"), schema, values, labels).unwrap()
}

/// Synthetic population whose `radius_mean` column spans exactly `[min, max]`.
pub fn dataset_with_radius_range(min: f64, max: f64) -> ReferenceDataset {
    let base = synthetic_dataset(17, 60);
    let radius = base.schema().index_of("radius_mean").unwrap();
    let mut rng = StdRng::seed_from_u64(17);

    let rows: Vec<Vec<f64>> = base
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut row = row.clone();
            row[radius] = match i {
                0 => min,
                1 => max,
                _ => min + (max - min) * rng.random_range(0.1..0.9),
            };
            row
        })
        .collect();
    ReferenceDataset::new(
        base.source(),
        Arc::clone(base.schema()),
        rows,
        base.labels().to_vec(),
    )
    .unwrap()
}

pub fn mean_vector(stats: &StatsTable) -> FeatureVector {
    stats.iter().map(|(feature, s)| (feature, s.mean)).collect()
}

/// Writes `dataset` in the reference layout: `id`, `diagnosis`, features, empty trailer.
pub fn write_dataset_csv(dir: &Path, dataset: &ReferenceDataset) -> PathBuf {
    let path = dir.join("data.csv");
    let mut writer = csv::Writer::from_writer(File::create(&path).unwrap());

    let mut header = vec!["id".to_string(), "diagnosis".to_string()];
    header.extend(dataset.schema().names().iter().cloned());
    header.push("Unnamed: 32".to_string());
    writer.write_record(&header).unwrap();

    for (i, (row, label)) in dataset.rows().iter().zip(dataset.labels()).enumerate() {
        let mut record = vec![
            (842_000 + i).to_string(),
            match label {
                Diagnosis::Benign => "B".to_string(),
                Diagnosis::Malignant => "M".to_string(),
            },
        ];
        record.extend(row.iter().map(f64::to_string));
        record.push(String::new());
        writer.write_record(&record).unwrap();
    }
    writer.flush().unwrap();
    path
}

fn fitted_moments(dataset: &ReferenceDataset) -> (Vec<f64>, Vec<f64>) {
    let n = dataset.len() as f64;
    (0..dataset.schema().len())
        .map(|i| {
            let column = || dataset.column(i).unwrap();
            let mean = column().sum::<f64>() / n;
            let var = column().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            (mean, if std == 0.0 { 1.0 } else { std })
        })
        .unzip()
}

/// Standard scaler fit on `dataset` the usual way (population standard deviation).
pub fn fit_standard_scaler(dataset: &ReferenceDataset) -> StandardScaler {
    let (mean, scale) = fitted_moments(dataset);
    StandardScaler::new(dataset.source(), mean, scale).unwrap()
}

fn wdbc_classifier() -> LogisticRegression {
    LogisticRegression::new("fixture", vec![0.5; 30], 0.0, [0, 1]).unwrap()
}

/// Scaler fit on `dataset` plus a classifier weighting every standardized feature equally.
pub fn wdbc_artifact(dataset: &ReferenceDataset) -> ModelArtifact {
    ModelArtifact::new(
        Arc::clone(dataset.schema()),
        Box::new(fit_standard_scaler(dataset)),
        Box::new(wdbc_classifier()),
    )
    .unwrap()
}

/// Writes dataset, scaler and model into `dir` and returns a config pointing at them.
pub fn write_wdbc_artifacts(dir: &Path, dataset: &ReferenceDataset) -> AppConfig {
    let dataset_path = write_dataset_csv(dir, dataset);
    let names = dataset.schema().names().to_vec();
    let (mean, scale) = fitted_moments(dataset);

    let scaler_path = dir.join("scaler.json");
    let scaler = StandardizerDocument {
        feature_names: Some(names.clone()),
        mean,
        scale,
    };
    serde_json::to_writer_pretty(File::create(&scaler_path).unwrap(), &scaler).unwrap();

    let model_path = dir.join("model.json");
    let classifier = wdbc_classifier();
    let model = ClassifierDocument::LogisticRegression {
        feature_names: Some(names),
        coefficients: classifier.coefficients().to_vec(),
        intercept: classifier.intercept(),
        classes: vec![0, 1],
    };
    serde_json::to_writer_pretty(File::create(&model_path).unwrap(), &model).unwrap();

    AppConfig {
        dataset_path,
        model_path,
        scaler_path,
        ..AppConfig::default()
    }
}
