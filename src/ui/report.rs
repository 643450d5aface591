use crate::core::PredictionResult;
use crate::data::ReferenceDataset;
use crate::presentation::RadarChart;
use crate::statistics::StatsTable;
use std::fmt::Write;
use strum::EnumMessage;

pub const DISCLAIMER: &str = "This tool can assist medical professionals in making a diagnosis, \
but should not be used as a substitute for a professional diagnosis.";

/// Verdict, class probabilities and (optionally) the radar chart series as a table.
pub fn render_assessment(
    prediction: &PredictionResult,
    chart: Option<&RadarChart>,
    decimals: usize,
) -> String {
    let mut out = String::new();
    let verdict = prediction
        .label
        .get_message()
        .unwrap_or_else(|| prediction.label.into());

    let _ = writeln!(out, "Cell cluster prediction");
    let _ = writeln!(out, "The cell cluster is: {verdict}");
    let _ = writeln!(
        out,
        "Probability of being benign:    {:.decimals$}",
        prediction.probability_benign
    );
    let _ = writeln!(
        out,
        "Probability of being malignant: {:.decimals$}",
        prediction.probability_malignant
    );

    if let Some(chart) = chart {
        let width = chart.categories.iter().map(|c| c.len()).max().unwrap_or(0);
        let col = decimals + 8;
        let _ = writeln!(out);
        let _ = write!(out, "{:width$}", "");
        for trace in &chart.traces {
            let _ = write!(out, " {:>col$}", trace.name);
        }
        let _ = writeln!(out);
        for (i, category) in chart.categories.iter().enumerate() {
            let _ = write!(out, "{category:width$}");
            for trace in &chart.traces {
                let _ = write!(out, " {:>col$.decimals$}", trace.values[i]);
            }
            let _ = writeln!(out);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{DISCLAIMER}");
    out
}

/// Row counts plus min / mean / max of every feature, in schema order.
pub fn render_stats(dataset: &ReferenceDataset, stats: &StatsTable, decimals: usize) -> String {
    let mut out = String::new();
    let (benign, malignant) = dataset.class_counts();
    let _ = writeln!(out, "Reference dataset: {}", dataset.source().display());
    let _ = writeln!(
        out,
        "Samples: {} ({benign} benign, {malignant} malignant)",
        dataset.len()
    );

    let width = stats.iter().map(|(f, _)| f.len()).max().unwrap_or(0);
    let col = decimals + 8;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:width$} {:>col$} {:>col$} {:>col$}",
        "feature", "min", "mean", "max"
    );
    for (feature, s) in stats.iter() {
        let _ = write!(out, "{feature:width$}");
        let _ = write!(out, " {:>col$.decimals$}", s.min);
        let _ = write!(out, " {:>col$.decimals$}", s.mean);
        let _ = writeln!(out, " {:>col$.decimals$}", s.max);
    }
    let degenerate = stats.degenerate_features();
    if !degenerate.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Zero-range features: {}", degenerate.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::RadarTrace;
    use crate::statistics::compute_stats;
    use crate::testing::fixtures;

    #[test]
    fn assessment_shows_verdict_probabilities_and_disclaimer() {
        let p = PredictionResult::from_probabilities(0.25, 0.75);
        let text = render_assessment(&p, None, 2);
        assert!(text.contains("The cell cluster is: Malignant"));
        assert!(text.contains("benign:    0.25"));
        assert!(text.contains("malignant: 0.75"));
        assert!(text.trim_end().ends_with(DISCLAIMER));
    }

    #[test]
    fn chart_table_has_one_row_per_category() {
        let chart = RadarChart {
            categories: vec!["Radius", "Texture"],
            traces: vec![RadarTrace {
                name: "Mean Value",
                group: "mean",
                values: vec![0.5, 0.125],
            }],
            radial_range: [0.0, 1.0],
        };
        let p = PredictionResult::from_probabilities(0.9, 0.1);
        let text = render_assessment(&p, Some(&chart), 3);
        assert!(text.contains("Mean Value"));
        let radius = text.lines().find(|l| l.starts_with("Radius")).unwrap();
        assert!(radius.ends_with("0.500"));
        let texture = text.lines().find(|l| l.starts_with("Texture")).unwrap();
        assert!(texture.ends_with("0.125"));
    }

    #[test]
    fn stats_lists_every_feature_with_counts() {
        let ds = fixtures::synthetic_dataset(12, 40);
        let stats = compute_stats(&ds).unwrap();
        let text = render_stats(&ds, &stats, 2);
        let (b, m) = ds.class_counts();
        assert!(text.contains(&format!("Samples: 40 ({b} benign, {m} malignant)")));
        assert!(text.lines().any(|l| l.starts_with("concave points_worst")));
        assert!(!text.contains("Zero-range"));
    }
}
