//! Fixed-template narrative rendering of an aggregate report.
//!
//! The presentation layer splits this text on blank lines and recognises
//! sections by their header prefix, so header text and order are fixed.

use std::fmt::Write;

use crate::domain::{AggregateReport, FileAnalysis, ReportStatus, Section};
use crate::lines::{OrderedLineSet, normalize_line};

/// Header of the overview section.
pub const OVERVIEW_HEADER: &str = "VISÃO GERAL";
/// Header of the risks section.
pub const RISKS_HEADER: &str = "PRINCIPAIS PONTOS DE ATENÇÃO";
/// Header of the improvement opportunities section.
pub const OPPORTUNITIES_HEADER: &str = "OPORTUNIDADES DE MELHORIA";
/// Header of the per-file details section.
pub const DETAILS_HEADER: &str = "DETALHES POR ARQUIVO";
/// Narrative for a request that supplied no files.
pub const NO_FILES_MESSAGE: &str = "Não foram encontrados arquivos para análise.";
/// Narrative for a request whose critiques could not be gathered.
pub const FAILED_MESSAGE: &str = "Erro ao analisar o código do repositório.";

/// Health band of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// 80 and above.
    Excellent,
    /// 60 to 79.
    Good,
    /// 40 to 59.
    Moderate,
    /// Below 40.
    NeedsImprovement,
}

impl HealthStatus {
    /// Classify a score.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Moderate,
            _ => Self::NeedsImprovement,
        }
    }

    /// Sentence fragment used in the overview.
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excelente saúde técnica",
            Self::Good => "boa saúde técnica",
            Self::Moderate => "saúde técnica moderada",
            Self::NeedsImprovement => "necessidade significativa de melhorias",
        }
    }
}

/// Health label for a score.
pub fn health_status(score: u8) -> &'static str {
    HealthStatus::from_score(score).label()
}

/// Render the report narrative.
pub fn format_analysis(report: &AggregateReport) -> String {
    match report.status {
        ReportStatus::Empty => return NO_FILES_MESSAGE.to_string(),
        ReportStatus::Failed => return FAILED_MESSAGE.to_string(),
        ReportStatus::Analyzed => {}
    }

    let mut output = String::new();
    let _ = writeln!(output, "{OVERVIEW_HEADER}");
    let _ = writeln!(output, "Score Médio: {}/100", report.average_score);
    let _ = writeln!(output, "Total de Arquivos: {}", report.total_files);
    let _ = writeln!(output, "{}\n", health_status(report.average_score));

    append_bullets(&mut output, RISKS_HEADER, &report.risks);
    append_bullets(&mut output, OPPORTUNITIES_HEADER, &report.recommendations);

    let _ = writeln!(output, "{DETAILS_HEADER}");
    for (index, analysis) in report.files.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(output);
        }
        append_file_details(&mut output, analysis);
    }

    output.truncate(output.trim_end().len());
    output
}

fn append_bullets(output: &mut String, header: &str, lines: &OrderedLineSet) {
    let _ = writeln!(output, "{header}");
    for line in lines.iter() {
        let _ = writeln!(output, "• {line}");
    }
    let _ = writeln!(output);
}

fn append_file_details(output: &mut String, analysis: &FileAnalysis) {
    let _ = writeln!(output, "{}", analysis.file_id);
    let _ = writeln!(output, "• Score de Qualidade: {}/100", analysis.file_score);
    for section in [
        Section::Architecture,
        Section::Maintainability,
        Section::TechnicalDebt,
    ] {
        let _ = writeln!(output, "• {}:", detail_label(section));
        for line in analysis.sections.get(section).lines().filter_map(normalize_line) {
            let _ = writeln!(output, "  - {line}");
        }
    }
}

fn detail_label(section: Section) -> &'static str {
    match section {
        Section::Architecture => "Análise de Arquitetura",
        Section::Maintainability => "Manutenibilidade e Escalabilidade",
        Section::TechnicalDebt => "Dívida Técnica",
        Section::Risks => "Riscos e Oportunidades",
        Section::Recommendations => "Recomendações",
    }
}
