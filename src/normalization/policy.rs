use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// What the normalizer does with a feature whose reference range is zero.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Report the feature at the middle of the chart.
    #[default]
    #[strum(message = "Place constant features at 0.5")]
    Midpoint,
    /// Fail the request with `DegenerateFeature`.
    #[strum(message = "Reject vectors touching constant features")]
    Reject,
}
