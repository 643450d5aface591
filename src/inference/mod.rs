mod artifact;
mod classifier;
mod logistic_regression;
mod pipeline;
mod standardizer;

pub use artifact::{
    ArtifactFormat, ClassifierDocument, ModelArtifact, StandardizerDocument, artifact_schemas,
};
pub use classifier::Classifier;
pub use logistic_regression::LogisticRegression;
pub use pipeline::InferencePipeline;
pub use standardizer::{StandardScaler, Standardizer};
