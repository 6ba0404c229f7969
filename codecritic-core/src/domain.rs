//! Domain entities for CodeCritic.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lines::OrderedLineSet;

/// One of the five fixed sections a critique is expected to contain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    /// Code quality and architecture.
    Architecture,
    /// Maintainability and scalability.
    Maintainability,
    /// Technical debt.
    TechnicalDebt,
    /// Risks and opportunities.
    Risks,
    /// Recommendations for investors.
    Recommendations,
}

impl Section {
    /// Every section, in template order.
    pub const ALL: [Section; 5] = [
        Section::Architecture,
        Section::Maintainability,
        Section::TechnicalDebt,
        Section::Risks,
        Section::Recommendations,
    ];

    /// The heading that opens this section in a critique.
    pub fn title(self) -> &'static str {
        match self {
            Section::Architecture => "QUALIDADE E ARQUITETURA",
            Section::Maintainability => "MANUTENIBILIDADE E ESCALABILIDADE",
            Section::TechnicalDebt => "DÍVIDA TÉCNICA",
            Section::Risks => "RISCOS E OPORTUNIDADES",
            Section::Recommendations => "RECOMENDAÇÕES PARA INVESTIDORES",
        }
    }
}

/// Extracted body text for each section of a single critique.
///
/// Missing sections hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionMap {
    /// Body of the architecture section.
    pub architecture: String,
    /// Body of the maintainability section.
    pub maintainability: String,
    /// Body of the technical debt section.
    pub technical_debt: String,
    /// Body of the risks section.
    pub risks: String,
    /// Body of the recommendations section.
    pub recommendations: String,
}

impl SectionMap {
    /// Borrow the body of a section.
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Architecture => &self.architecture,
            Section::Maintainability => &self.maintainability,
            Section::TechnicalDebt => &self.technical_debt,
            Section::Risks => &self.risks,
            Section::Recommendations => &self.recommendations,
        }
    }

    /// Replace the body of a section.
    pub fn set(&mut self, section: Section, body: String) {
        let slot = match section {
            Section::Architecture => &mut self.architecture,
            Section::Maintainability => &mut self.maintainability,
            Section::TechnicalDebt => &mut self.technical_debt,
            Section::Risks => &mut self.risks,
            Section::Recommendations => &mut self.recommendations,
        };
        *slot = body;
    }

    /// Returns true when no section was found.
    pub fn is_empty(&self) -> bool {
        Section::ALL
            .iter()
            .all(|section| self.get(*section).is_empty())
    }
}

/// Free-text critique of a single file, as supplied by the text generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawCritique {
    /// Identifier of the critiqued file, usually its repository path.
    pub file_id: String,
    /// Critique text.
    pub critique: String,
}

impl RawCritique {
    /// Create a critique for a file.
    pub fn new(file_id: impl Into<String>, critique: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            critique: critique.into(),
        }
    }
}

/// Scored analysis of a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    /// Identifier of the analyzed file.
    pub file_id: String,
    /// Language detected from the file identifier, if known.
    pub language: Option<String>,
    /// Sections extracted from the critique.
    pub sections: SectionMap,
    /// File quality score, 0-100.
    pub file_score: u8,
}

/// Outcome of a repository analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// At least one file was analyzed.
    Analyzed,
    /// No files were supplied.
    Empty,
    /// The critiques could not be gathered.
    Failed,
}

/// Repository-level report merged from every file analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    /// Outcome of the analysis.
    pub status: ReportStatus,
    /// Rounded mean of every file score, 0 when no file was analyzed.
    pub average_score: u8,
    /// Number of analyzed files.
    pub total_files: usize,
    /// Per-file analyses in input order, unique by file identifier.
    pub files: Vec<FileAnalysis>,
    /// Distinct risk lines in first-seen order.
    #[schema(value_type = Vec<String>)]
    pub risks: OrderedLineSet,
    /// Distinct recommendation lines in first-seen order.
    #[schema(value_type = Vec<String>)]
    pub recommendations: OrderedLineSet,
}

impl AggregateReport {
    /// Report for a request that supplied no files.
    pub fn empty() -> Self {
        Self::sentinel(ReportStatus::Empty)
    }

    /// Report for a request whose critiques could not be gathered.
    pub fn failed() -> Self {
        Self::sentinel(ReportStatus::Failed)
    }

    /// Look up the analysis for a file identifier.
    pub fn file(&self, file_id: &str) -> Option<&FileAnalysis> {
        self.files.iter().find(|analysis| analysis.file_id == file_id)
    }

    fn sentinel(status: ReportStatus) -> Self {
        Self {
            status,
            average_score: 0,
            total_files: 0,
            files: Vec::new(),
            risks: OrderedLineSet::new(),
            recommendations: OrderedLineSet::new(),
        }
    }
}
