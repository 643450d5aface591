use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

pub const DEFAULT_DECIMALS: u64 = 3;

fn default_decimals() -> u64 {
    DEFAULT_DECIMALS
}

fn default_show_chart() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagnoseParams {
    #[serde(default = "default_show_chart")]
    #[schemars(
        title = "Show Chart",
        description = "Print the radar chart series next to the verdict",
        default = "default_show_chart"
    )]
    pub show_chart: bool,

    #[serde(default = "default_decimals")]
    #[schemars(
        title = "Decimals",
        description = "Digits printed after the decimal point",
        range(min = 1, max = 8),
        default = "default_decimals"
    )]
    pub decimals: u64,

    #[serde(default)]
    #[schemars(
        title = "Export Path",
        description = "Write the assessment and chart as JSON to this file"
    )]
    pub export_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    #[serde(default = "default_decimals")]
    #[schemars(
        title = "Decimals",
        description = "Digits printed after the decimal point",
        range(min = 1, max = 8),
        default = "default_decimals"
    )]
    pub decimals: u64,
}

/// Empty parameter object so the wizard can still look under "params"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct NoParams {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Diagnose Sample",
        detailed_message = "Enter cell measurements and get a benign/malignant prediction."
    ))]
    Diagnose(DiagnoseParams),

    #[strum_discriminants(strum(
        message = "Summarize Reference Data",
        detailed_message = "Show min, mean and max of every feature."
    ))]
    Summarize(SummarizeParams),

    #[strum_discriminants(strum(
        message = "Artifact Schemas",
        detailed_message = "Print the JSON Schemas expected for model and scaler files."
    ))]
    ArtifactSchemas(NoParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::Diagnose => json!({
                "show_chart": true,
                "decimals": DEFAULT_DECIMALS,
                "export_path": null,
            }),
            TaskKind::Summarize => json!({ "decimals": DEFAULT_DECIMALS }),
            TaskKind::ArtifactSchemas => json!({}),
        }
    }
}
