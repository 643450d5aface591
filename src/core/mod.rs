pub mod error;
pub mod features;
pub mod prediction;

pub use error::{DiagnosisError, Result};
pub use features::{FeatureGroup, FeatureSchema, FeatureVector, Measurement, ScaledVector};
pub use prediction::{Diagnosis, PredictionResult};
