use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Base nucleus measurement taken from a digitized fine needle aspirate.
///
/// The serialized form is the prefix used in the reference dataset column
/// names (`radius`, `concave points`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr, EnumMessage,
)]
#[strum(serialize_all = "snake_case")]
pub enum Measurement {
    #[strum(message = "Radius")]
    Radius,
    #[strum(message = "Texture")]
    Texture,
    #[strum(message = "Perimeter")]
    Perimeter,
    #[strum(message = "Area")]
    Area,
    #[strum(message = "Smoothness")]
    Smoothness,
    #[strum(message = "Compactness")]
    Compactness,
    #[strum(message = "Concavity")]
    Concavity,
    #[strum(serialize = "concave points", message = "Concave Points")]
    ConcavePoints,
    #[strum(message = "Symmetry")]
    Symmetry,
    #[strum(message = "Fractal Dimension")]
    FractalDimension,
}

/// Aggregate reported for each base measurement over the nuclei of a sample.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr, EnumMessage,
)]
pub enum FeatureGroup {
    #[strum(serialize = "mean", message = "Mean Value", detailed_message = "mean")]
    Mean,
    #[strum(serialize = "se", message = "Standard Error", detailed_message = "standard error")]
    StandardError,
    #[strum(serialize = "worst", message = "Worst Value", detailed_message = "worst")]
    Worst,
}

impl Measurement {
    pub fn label(self) -> &'static str {
        self.get_message().unwrap_or_else(|| self.into())
    }
}

impl FeatureGroup {
    pub fn label(self) -> &'static str {
        self.get_message().unwrap_or_else(|| self.into())
    }
}

/// Column identifier for one measurement/group pair, e.g. `radius_mean`.
pub fn feature_id(measurement: Measurement, group: FeatureGroup) -> String {
    let m: &'static str = measurement.into();
    let g: &'static str = group.into();
    format!("{m}_{g}")
}

/// Inverse of [`feature_id`]; `None` for names outside the 10 x 3 grid.
pub fn parse_feature_id(name: &str) -> Option<(Measurement, FeatureGroup)> {
    let (m, g) = name.rsplit_once('_')?;
    Some((m.parse().ok()?, g.parse().ok()?))
}

/// Human readable prompt label, e.g. `Radius (standard error)`.
pub fn feature_label(name: &str) -> String {
    match parse_feature_id(name) {
        Some((m, g)) => format!(
            "{} ({})",
            m.label(),
            g.get_detailed_message().unwrap_or_else(|| g.into())
        ),
        None => name.to_string(),
    }
}

pub(crate) fn grid() -> impl Iterator<Item = (Measurement, FeatureGroup)> {
    FeatureGroup::iter().flat_map(|g| Measurement::iter().map(move |m| (m, g)))
}
