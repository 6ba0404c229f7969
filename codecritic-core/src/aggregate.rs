//! Repository-level aggregation of per-file critiques.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::composer::calculate_file_score;
use crate::domain::{AggregateReport, FileAnalysis, RawCritique, ReportStatus};
use crate::language::detect_language;
use crate::lines::OrderedLineSet;
use crate::score::{clamp_score, explicit_score, rounded_mean};
use crate::sections::extract_sections;

/// Extract and score a single critique.
///
/// Explicit `Score: N` figures in the critique take precedence; without
/// them the file is scored from its architecture, maintainability and
/// technical debt sections.
pub fn analyze_critique(critique: &RawCritique) -> FileAnalysis {
    let sections = extract_sections(&critique.critique);
    if sections.is_empty() {
        debug!("no template sections found in critique for {}", critique.file_id);
    }
    let file_score = explicit_score(&critique.critique).unwrap_or_else(|| {
        calculate_file_score(
            &sections.architecture,
            &sections.maintainability,
            &sections.technical_debt,
        )
    });

    FileAnalysis {
        file_id: critique.file_id.clone(),
        language: detect_language(&critique.file_id),
        sections,
        file_score,
    }
}

/// Analyze every critique and merge the results into one report.
pub fn combine_analyses(critiques: &[RawCritique]) -> AggregateReport {
    merge_file_analyses(critiques.iter().map(analyze_critique).collect())
}

/// Merge already computed file analyses, in input order.
///
/// A later analysis for an already seen file identifier replaces the
/// earlier one in place.
pub fn merge_file_analyses(analyses: Vec<FileAnalysis>) -> AggregateReport {
    if analyses.is_empty() {
        debug!("no files to aggregate");
        return AggregateReport::empty();
    }

    let mut by_id: IndexMap<String, FileAnalysis> = IndexMap::with_capacity(analyses.len());
    for analysis in analyses {
        if let Some(previous) = by_id.insert(analysis.file_id.clone(), analysis) {
            warn!("duplicate critique for {}, keeping the latest", previous.file_id);
        }
    }
    let files: Vec<FileAnalysis> = by_id.into_values().collect();

    let mut risks = OrderedLineSet::new();
    let mut recommendations = OrderedLineSet::new();
    for analysis in &files {
        risks.extend_from_body(&analysis.sections.risks);
        recommendations.extend_from_body(&analysis.sections.recommendations);
    }

    let average_score = rounded_mean(files.iter().map(|analysis| u64::from(analysis.file_score)))
        .map(clamp_score)
        .unwrap_or(0);

    AggregateReport {
        status: ReportStatus::Analyzed,
        average_score,
        total_files: files.len(),
        files,
        risks,
        recommendations,
    }
}
