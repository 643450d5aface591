use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, IntoStaticStr};

/// Discrete verdict for a sample.
///
/// The class codes are the ones the reference dataset label is mapped to:
/// benign is `0`, malignant is `1`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnosis {
    #[strum(serialize = "benign", message = "Benign")]
    Benign,
    #[strum(serialize = "malignant", message = "Malignant")]
    Malignant,
}

impl Diagnosis {
    pub const fn class_code(self) -> u8 {
        match self {
            Diagnosis::Benign => 0,
            Diagnosis::Malignant => 1,
        }
    }

    pub const fn from_class_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Diagnosis::Benign),
            1 => Some(Diagnosis::Malignant),
            _ => None,
        }
    }

    /// Textual category used by the reference dataset (`B` / `M`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "B" => Some(Diagnosis::Benign),
            "M" => Some(Diagnosis::Malignant),
            _ => None,
        }
    }
}

/// Verdict plus the classifier's probability for each class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Diagnosis,
    pub probability_benign: f64,
    pub probability_malignant: f64,
}

impl PredictionResult {
    /// Verdict decided by the classifier alongside its probabilities.
    pub fn new(label: Diagnosis, probability_benign: f64, probability_malignant: f64) -> Self {
        Self {
            label,
            probability_benign,
            probability_malignant,
        }
    }

    /// Packages a probability pair.
    ///
    /// The label is `Malignant` iff `probability_malignant > probability_benign`;
    /// an exact tie resolves to `Benign`, the lower class code.
    pub fn from_probabilities(probability_benign: f64, probability_malignant: f64) -> Self {
        let label = if probability_malignant > probability_benign {
            Diagnosis::Malignant
        } else {
            Diagnosis::Benign
        };
        Self::new(label, probability_benign, probability_malignant)
    }

    pub fn probability_of(&self, diagnosis: Diagnosis) -> f64 {
        match diagnosis {
            Diagnosis::Benign => self.probability_benign,
            Diagnosis::Malignant => self.probability_malignant,
        }
    }
}
