//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;
use stroke_risk_core::export::{DocumentRenderer, PlainTextRenderer, Report, ReportDocument};
use stroke_risk_core::flow::{transition, FlowEvent, FlowState};
use stroke_risk_core::{PatientForm, RiskEngine};
use stroke_risk_pdf::PdfRenderer;

use crate::args::OutputFormat;

/// Default file name for JSON output.
pub const JSON_FILE_NAME: &str = "stroke_report.json";

/// Walk the form (registration, details, results) and return the report.
pub fn assess(engine: &RiskEngine, name: String, form: PatientForm) -> Result<Report> {
    let state = transition(&FlowState::Registration, FlowEvent::SubmitName(name), engine)?;
    let state = transition(&state, FlowEvent::SubmitDetails(form), engine)?;

    state
        .report()
        .cloned()
        .context("assessment finished without a report")
}

/// Render a report; returns the bytes and the default file name.
pub fn render(report: &Report, format: OutputFormat) -> Result<(Vec<u8>, &'static str)> {
    match format {
        OutputFormat::Json => Ok((report.to_json()?.into_bytes(), JSON_FILE_NAME)),
        OutputFormat::Text => render_document(report, &PlainTextRenderer),
        OutputFormat::Pdf => render_document(report, &PdfRenderer::default()),
    }
}

fn render_document(
    report: &Report,
    renderer: &dyn DocumentRenderer,
) -> Result<(Vec<u8>, &'static str)> {
    let bytes = renderer.render(&ReportDocument::from_report(report))?;
    Ok((bytes, renderer.file_name()))
}

/// Assess, render and write the report. Returns the path written.
pub fn assess_to_file(
    engine: &RiskEngine,
    name: String,
    form: PatientForm,
    format: OutputFormat,
    out: Option<&Path>,
) -> Result<PathBuf> {
    let report = assess(engine, name, form)?;
    let (bytes, default_name) = render(&report, format)?;

    let path = out.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(default_name));
    std::fs::write(&path, &bytes)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    tracing::info!(
        "Report written: tier={}, probability={}, {} bytes",
        report.tier,
        report.probability_display(),
        bytes.len()
    );

    println!("{}", report.tier.headline());
    println!("Probability: {}", report.probability_display());
    println!("Report saved to {}", path.display());

    Ok(path)
}

/// Model summary for `inspect`.
pub fn describe(engine: &RiskEngine) -> serde_json::Value {
    let features: Vec<serde_json::Value> = engine
        .schema()
        .iter()
        .zip(engine.predictor().coefficients())
        .map(|(feature, coefficient)| {
            json!({
                "name": feature.name,
                "label": feature.label,
                "coefficient": coefficient,
            })
        })
        .collect();

    json!({
        "features": features,
        "intercept": engine.predictor().intercept(),
        "fingerprints": {
            "encoder": engine.fingerprints().encoder,
            "classifier": engine.fingerprints().classifier,
        },
    })
}
