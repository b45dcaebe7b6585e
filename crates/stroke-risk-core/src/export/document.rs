//! Renderer-neutral report layout.
//!
//! A [`ReportDocument`] is the ordered page content of a report. Output
//! formats implement [`DocumentRenderer`]; this crate ships a plain-text
//! renderer and the `stroke-risk-pdf` crate ships the PDF one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Report;

pub const REPORT_TITLE: &str = "Stroke Risk Prediction Report";
pub const RISK_FACTORS_HEADING: &str = "Risk Increasing Factors:";
pub const PROTECTIVE_FACTORS_HEADING: &str = "Protective (Risk Reducing) Factors:";

/// Download name of the PDF report.
pub const PDF_FILE_NAME: &str = "stroke_report.pdf";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF backend error: {0}")]
    Backend(String),

    #[error("Unsupported content: {0}")]
    Unsupported(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// One piece of page content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Block {
    Title(String),
    /// Single line of body text
    Line(String),
    /// Wrapped body text; may contain explicit newlines
    Paragraph(String),
    /// Bold section heading
    Heading(String),
    /// List item, rendered as "- text"
    Bullet(String),
    /// Vertical space in line-height fractions
    Spacer(f32),
}

/// Ordered page content for one report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDocument {
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    /// Lay out a report: title, patient, tier, probability, summary, factor lists.
    pub fn from_report(report: &Report) -> Self {
        let mut blocks = vec![
            Block::Title(REPORT_TITLE.to_string()),
            Block::Line(format!("Patient Name: {}", report.patient_name)),
            Block::Line(format!("Risk Level: {}", report.tier)),
            Block::Line(format!("Probability: {}", report.probability_display())),
            Block::Spacer(0.5),
            Block::Paragraph(format!("Summary:\n{}", report.summary_text)),
            Block::Spacer(0.5),
            Block::Heading(RISK_FACTORS_HEADING.to_string()),
        ];

        blocks.extend(
            report
                .risk_increasing_factors
                .iter()
                .map(|f| Block::Bullet(f.clone())),
        );

        blocks.push(Block::Spacer(0.3));
        blocks.push(Block::Heading(PROTECTIVE_FACTORS_HEADING.to_string()));
        blocks.extend(
            report
                .protective_factors
                .iter()
                .map(|f| Block::Bullet(f.clone())),
        );

        Self { blocks }
    }
}

/// An output format for report documents.
pub trait DocumentRenderer {
    /// MIME type of the rendered bytes.
    fn media_type(&self) -> &'static str;

    /// Suggested download file name.
    fn file_name(&self) -> &'static str;

    fn render(&self, document: &ReportDocument) -> RenderResult<Vec<u8>>;
}

/// UTF-8 text rendering, one block per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn media_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_name(&self) -> &'static str {
        "stroke_report.txt"
    }

    fn render(&self, document: &ReportDocument) -> RenderResult<Vec<u8>> {
        let mut out = String::new();

        for block in &document.blocks {
            match block {
                Block::Title(text) => {
                    out.push_str(text);
                    out.push('\n');
                    out.push_str(&"=".repeat(text.chars().count()));
                    out.push('\n');
                }
                Block::Line(text) | Block::Paragraph(text) | Block::Heading(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Bullet(text) => {
                    out.push_str("- ");
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Spacer(_) => out.push('\n'),
            }
        }

        Ok(out.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTier;

    fn report() -> Report {
        Report {
            patient_name: "Jane Doe".into(),
            probability: 0.8213,
            tier: RiskTier::High,
            summary_text: super::super::HIGH_RISK_SUMMARY.into(),
            risk_increasing_factors: vec!["Age".into(), "Smoker".into()],
            protective_factors: vec!["Gender: Female".into()],
        }
    }

    #[test]
    fn test_layout_order() {
        let doc = ReportDocument::from_report(&report());
        let texts: Vec<String> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Spacer(_) => None,
                Block::Title(t) | Block::Line(t) | Block::Paragraph(t) | Block::Heading(t) => {
                    Some(t.clone())
                }
                Block::Bullet(t) => Some(format!("- {}", t)),
            })
            .collect();

        assert_eq!(
            texts,
            vec![
                "Stroke Risk Prediction Report".to_string(),
                "Patient Name: Jane Doe".to_string(),
                "Risk Level: High Risk".to_string(),
                "Probability: 0.82".to_string(),
                format!("Summary:\n{}", super::super::HIGH_RISK_SUMMARY),
                "Risk Increasing Factors:".to_string(),
                "- Age".to_string(),
                "- Smoker".to_string(),
                "Protective (Risk Reducing) Factors:".to_string(),
                "- Gender: Female".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_factor_lists_keep_headings() {
        let mut report = report();
        report.risk_increasing_factors.clear();
        report.protective_factors.clear();
        let doc = ReportDocument::from_report(&report);

        let headings = doc
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading(_)))
            .count();
        assert_eq!(headings, 2);
        assert!(!doc.blocks.iter().any(|b| matches!(b, Block::Bullet(_))));
    }

    #[test]
    fn test_plain_text() {
        let doc = ReportDocument::from_report(&report());
        let bytes = PlainTextRenderer.render(&doc).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("Stroke Risk Prediction Report\n=============================\n"));
        assert!(text.contains("Risk Level: High Risk\n"));
        assert!(text.contains("- Smoker\n"));
        assert_eq!(PlainTextRenderer.file_name(), "stroke_report.txt");
    }
}
