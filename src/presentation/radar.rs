use crate::core::features::{WDBC_SCHEMA_VERSION, feature_id};
use crate::core::{DiagnosisError, FeatureGroup, Measurement, Result, ScaledVector};
use serde::Serialize;
use strum::IntoEnumIterator;

/// One closed polygon of the radar chart: a feature group over all measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarTrace {
    pub name: &'static str,
    /// Column suffix of the plotted group (`mean`, `se`, `worst`).
    pub group: &'static str,
    pub values: Vec<f64>,
}

/// Plot-ready radar chart description; rendering is left to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub categories: Vec<&'static str>,
    pub traces: Vec<RadarTrace>,
    pub radial_range: [f64; 2],
}

/// Builds the three-trace radar chart from a scaled 30-feature vector.
///
/// With `clamp` set, values are bounded to the `[0, 1]` radial range first.
pub fn build_radar_chart(scaled: &ScaledVector, clamp: bool) -> Result<RadarChart> {
    let clamped;
    let source = if clamp {
        clamped = scaled.clamped();
        &clamped
    } else {
        scaled
    };

    let mut missing = Vec::new();
    let traces = FeatureGroup::iter()
        .map(|group| {
            let values = Measurement::iter()
                .map(|m| {
                    let id = feature_id(m, group);
                    source.get(&id).unwrap_or_else(|| {
                        missing.push(id);
                        f64::NAN
                    })
                })
                .collect();
            RadarTrace {
                name: group.label(),
                group: group.into(),
                values,
            }
        })
        .collect();

    if !missing.is_empty() {
        return Err(DiagnosisError::SchemaMismatch {
            schema_version: WDBC_SCHEMA_VERSION.to_string(),
            missing,
            unexpected: Vec::new(),
            non_finite: Vec::new(),
        });
    }

    Ok(RadarChart {
        categories: Measurement::iter().map(Measurement::label).collect(),
        traces,
        radial_range: [0.0, 1.0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FeatureSchema;

    fn scaled_with(f: impl Fn(usize) -> f64) -> ScaledVector {
        let schema = FeatureSchema::wdbc();
        ScaledVector::from_pairs(
            schema
                .names()
                .iter()
                .enumerate()
                .map(|(i, n)| (n.clone(), f(i))),
        )
    }

    #[test]
    fn traces_follow_group_and_measurement_order() {
        let chart = build_radar_chart(&scaled_with(|i| i as f64 / 30.0), false).unwrap();
        assert_eq!(chart.categories.len(), 10);
        assert_eq!(chart.categories[7], "Concave Points");
        let names: Vec<_> = chart.traces.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Mean Value", "Standard Error", "Worst Value"]);
        assert_eq!(chart.traces[1].group, "se");
        assert!((chart.traces[1].values[0] - 10.0 / 30.0).abs() < 1e-12);
        assert!((chart.traces[2].values[9] - 29.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn clamp_bounds_values_to_radial_range() {
        let scaled = scaled_with(|i| if i == 0 { 1.4 } else { -0.2 });
        let raw = build_radar_chart(&scaled, false).unwrap();
        assert_eq!(raw.traces[0].values[0], 1.4);
        let bounded = build_radar_chart(&scaled, true).unwrap();
        assert_eq!(bounded.traces[0].values[0], 1.0);
        assert_eq!(bounded.traces[2].values[3], 0.0);
    }

    #[test]
    fn missing_feature_is_schema_mismatch() {
        let partial = ScaledVector::from_pairs([("radius_mean".to_string(), 0.5)]);
        match build_radar_chart(&partial, true).unwrap_err() {
            DiagnosisError::SchemaMismatch { missing, .. } => assert_eq!(missing.len(), 29),
            other => panic!("unexpected error: {other}"),
        }
    }
}
