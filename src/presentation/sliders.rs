use crate::core::features::feature_label;
use crate::statistics::StatsTable;
use serde::Serialize;

/// Input bounds for one feature: `[0, observed max]`, starting at the observed mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub feature: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl SliderSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One slider per schema feature, in schema order.
pub fn slider_specs(stats: &StatsTable) -> Vec<SliderSpec> {
    stats
        .iter()
        .map(|(feature, s)| SliderSpec {
            feature: feature.to_string(),
            label: feature_label(feature),
            min: 0.0,
            max: s.max.max(0.0),
            default: s.mean.max(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::compute_stats;
    use crate::testing::fixtures;

    #[test]
    fn bounds_come_from_reference_population() {
        let ds = fixtures::synthetic_dataset(9, 50);
        let stats = compute_stats(&ds).unwrap();
        let sliders = slider_specs(&stats);

        assert_eq!(sliders.len(), 30);
        assert_eq!(sliders[0].feature, "radius_mean");
        assert_eq!(sliders[0].label, "Radius (mean)");
        for (slider, (_, s)) in sliders.iter().zip(stats.iter()) {
            assert_eq!(slider.min, 0.0);
            assert_eq!(slider.max, s.max);
            assert_eq!(slider.default, s.mean);
            assert!(slider.contains(slider.default));
        }
    }
}
