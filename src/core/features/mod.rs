mod measurement;
mod schema;
mod vector;

pub use measurement::{FeatureGroup, Measurement, feature_id, feature_label, parse_feature_id};
pub use schema::{FeatureSchema, WDBC_SCHEMA_VERSION};
pub use vector::{FeatureVector, ScaledVector};
