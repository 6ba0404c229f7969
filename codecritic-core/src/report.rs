//! Report formatting utilities for CodeCritic outputs.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AggregateReport, FileAnalysis, ReportStatus, Section};
use crate::insights::{InsightCard, parse_insight_cards};
use crate::lines::{OrderedLineSet, normalize_line};
use crate::narrative::{FAILED_MESSAGE, NO_FILES_MESSAGE, format_analysis, health_status};

/// Aggregate report bundled with its rendered narrative and cards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportEnvelope {
    /// Aggregate report.
    pub report: AggregateReport,
    /// Narrative rendered from the report.
    pub narrative: String,
    /// Cards parsed from the narrative.
    pub cards: Vec<InsightCard>,
}

impl ReportEnvelope {
    /// Render the narrative and cards for a report.
    pub fn new(report: AggregateReport) -> Self {
        let narrative = format_analysis(&report);
        let cards = parse_insight_cards(&narrative);
        Self {
            report,
            narrative,
            cards,
        }
    }
}

/// Render an aggregate report as Markdown.
pub fn render_markdown(report: &AggregateReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Code Quality Report\n");
    match report.status {
        ReportStatus::Empty => {
            let _ = writeln!(output, "{NO_FILES_MESSAGE}");
            return output;
        }
        ReportStatus::Failed => {
            let _ = writeln!(output, "{FAILED_MESSAGE}");
            return output;
        }
        ReportStatus::Analyzed => {}
    }

    let _ = writeln!(output, "- Average score: {}/100", report.average_score);
    let _ = writeln!(output, "- Files analyzed: {}", report.total_files);
    let _ = writeln!(output, "- Health: {}\n", health_status(report.average_score));
    append_list(&mut output, "Risks", &report.risks, "No risks reported.");
    append_list(
        &mut output,
        "Recommendations",
        &report.recommendations,
        "No recommendations reported.",
    );
    let _ = writeln!(output, "## Files\n");
    for analysis in &report.files {
        append_file(&mut output, analysis);
    }
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

fn append_list(output: &mut String, title: &str, items: &OrderedLineSet, empty_message: &str) {
    if items.is_empty() {
        let _ = writeln!(output, "## {title}\n{empty_message}\n");
        return;
    }
    let _ = writeln!(output, "## {title}");
    for item in items.iter() {
        let _ = writeln!(output, "- {item}");
    }
    let _ = writeln!(output);
}

fn append_file(output: &mut String, analysis: &FileAnalysis) {
    let _ = writeln!(output, "### {}\n", analysis.file_id);
    if let Some(language) = &analysis.language {
        let _ = writeln!(output, "- Language: {language}");
    }
    let _ = writeln!(output, "- Score: {}/100\n", analysis.file_score);
    for (section, title) in [
        (Section::Architecture, "Architecture"),
        (Section::Maintainability, "Maintainability"),
        (Section::TechnicalDebt, "Technical debt"),
    ] {
        let lines: Vec<String> = analysis
            .sections
            .get(section)
            .lines()
            .filter_map(normalize_line)
            .collect();
        if lines.is_empty() {
            let _ = writeln!(output, "**{title}:** not reported.\n");
            continue;
        }
        let _ = writeln!(output, "**{title}:**");
        for line in lines {
            let _ = writeln!(output, "- {line}");
        }
        let _ = writeln!(output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::combine_analyses;
    use crate::domain::RawCritique;
    use crate::insights::InsightKind;

    fn sample_report() -> AggregateReport {
        combine_analyses(&[RawCritique::new(
            "src/main.rs",
            "QUALIDADE E ARQUITETURA\n- Camadas bem definidas\nScore: 84\n\nRISCOS E OPORTUNIDADES\n- dependência única de fornecedor",
        )])
    }

    #[test]
    fn renders_markdown() {
        let output = render_markdown(&sample_report());
        assert!(output.contains("# Code Quality Report"));
        assert!(output.contains("Average score: 84/100"));
        assert!(output.contains("Health: excelente saúde técnica"));
        assert!(output.contains("- dependência única de fornecedor"));
        assert!(output.contains("No recommendations reported."));
        assert!(output.contains("### src/main.rs"));
        assert!(output.contains("- Language: Rust"));
        assert!(output.contains("**Technical debt:** not reported."));
    }

    #[test]
    fn renders_markdown_sentinels() {
        assert!(render_markdown(&AggregateReport::empty()).contains(NO_FILES_MESSAGE));
        assert!(render_markdown(&AggregateReport::failed()).contains(FAILED_MESSAGE));
    }

    #[test]
    fn envelope_carries_narrative_and_cards() {
        let envelope = ReportEnvelope::new(sample_report());
        assert!(envelope.narrative.starts_with("VISÃO GERAL"));
        assert_eq!(envelope.cards[0].kind, InsightKind::Overview);
    }

    #[test]
    fn renders_json_payload() {
        let json = render_json(&ReportEnvelope::new(sample_report())).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["report"]["averageScore"], 84);
        assert_eq!(parsed["report"]["files"][0]["fileId"], "src/main.rs");
        assert_eq!(parsed["report"]["risks"][0], "dependência única de fornecedor");
        assert_eq!(parsed["cards"][1]["kind"], "list");
    }
}
