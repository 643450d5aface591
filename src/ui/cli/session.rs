use crate::inference::artifact_schemas;
use crate::presentation::{RadarChart, build_radar_chart};
use crate::service::{Assessment, DiagnosisService};
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::wizard::{prompt_choice, prompt_feature_vector};
use crate::ui::report::{render_assessment, render_stats};
use crate::ui::types::choices::{DiagnoseParams, SummarizeParams, TaskChoice};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

#[derive(Serialize)]
struct ExportedAssessment<'a> {
    assessment: &'a Assessment,
    chart: &'a RadarChart,
}

/// Runs one wizard task against `service`, writing its report to `out`.
pub fn run<D: PromptDriver, W: Write>(
    driver: &D,
    service: &DiagnosisService,
    clamp_chart: bool,
    out: &mut W,
) -> Result<()> {
    let task: TaskChoice = prompt_choice(driver).context("task selection failed")?;
    info!(?task, "task selected");

    match task {
        TaskChoice::Diagnose(params) => diagnose(driver, service, clamp_chart, &params, out),
        TaskChoice::Summarize(params) => summarize(service, &params, out),
        TaskChoice::ArtifactSchemas(_) => print_artifact_schemas(out),
    }
}

fn diagnose<D: PromptDriver, W: Write>(
    driver: &D,
    service: &DiagnosisService,
    clamp_chart: bool,
    params: &DiagnoseParams,
    out: &mut W,
) -> Result<()> {
    let sliders = service.sliders()?;
    let vector = prompt_feature_vector(driver, &sliders)?;
    let assessment = service.assess(&vector)?;
    let chart = build_radar_chart(&assessment.scaled, clamp_chart)?;

    let shown = params.show_chart.then_some(&chart);
    let text = render_assessment(&assessment.prediction, shown, params.decimals as usize);
    out.write_all(text.as_bytes())?;

    if let Some(path) = params.export_path.as_deref() {
        let file = File::create(path).with_context(|| format!("cannot create {path}"))?;
        let export = ExportedAssessment {
            assessment: &assessment,
            chart: &chart,
        };
        serde_json::to_writer_pretty(BufWriter::new(file), &export)
            .with_context(|| format!("cannot write {path}"))?;
        writeln!(out, "Assessment written to {path}")?;
    }
    Ok(())
}

fn summarize<W: Write>(
    service: &DiagnosisService,
    params: &SummarizeParams,
    out: &mut W,
) -> Result<()> {
    let stats = service.stats()?;
    let dataset = service.statistics().dataset();
    out.write_all(render_stats(dataset, stats, params.decimals as usize).as_bytes())?;
    Ok(())
}

fn print_artifact_schemas<W: Write>(out: &mut W) -> Result<()> {
    let doc: Map<String, Value> = artifact_schemas()
        .into_iter()
        .map(|(role, schema)| (role.to_string(), schema.to_value()))
        .collect();
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedDriver, fixtures};

    fn service(dir: &std::path::Path) -> DiagnosisService {
        let dataset = fixtures::synthetic_dataset(31, 120);
        let config = fixtures::write_wdbc_artifacts(dir, &dataset);
        DiagnosisService::from_config(&config).unwrap()
    }

    fn run_to_string(driver: &ScriptedDriver, svc: &DiagnosisService) -> String {
        let mut out = Vec::new();
        run(driver, svc, true, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn diagnose_at_reference_means_prints_verdict_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());
        let export = dir.path().join("assessment.json");

        let mut driver = ScriptedDriver::new()
            .select(0)
            .boolean(true)
            .integer(3)
            .text(export.to_str().unwrap());
        for _ in 0..30 {
            driver = driver.accept_default();
        }
        let text = run_to_string(&driver, &svc);
        assert!(driver.is_exhausted());
        assert!(text.contains("The cell cluster is: "));
        assert!(text.contains("Worst Value"));
        assert!(text.contains("Assessment written to"));

        let json: Value = serde_json::from_reader(File::open(&export).unwrap()).unwrap();
        let p = &json["assessment"]["prediction"];
        let sum = p["probability_benign"].as_f64().unwrap()
            + p["probability_malignant"].as_f64().unwrap();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(json["chart"]["traces"].as_array().unwrap().len(), 3);
        assert_eq!(json["assessment"]["scaled"].as_object().unwrap().len(), 30);
    }

    #[test]
    fn summarize_prints_reference_stats() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());
        let driver = ScriptedDriver::new().select(1).integer(2);
        let text = run_to_string(&driver, &svc);
        assert!(text.contains("Samples: 120"));
        assert!(text.lines().any(|l| l.starts_with("radius_mean")));
    }

    #[test]
    fn artifact_schemas_are_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(dir.path());
        let driver = ScriptedDriver::new().select(2);
        let text = run_to_string(&driver, &svc);
        let doc: Value = serde_json::from_str(&text).unwrap();
        assert!(doc.get("scaler").is_some());
        assert!(doc.get("model").is_some());
    }
}
