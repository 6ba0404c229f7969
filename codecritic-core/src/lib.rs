#![deny(missing_docs)]
//! CodeCritic core library.
//!
//! Turns free-text, per-file code critiques into a deterministic,
//! numerically scored repository report and its fixed-template narrative.

pub mod aggregate;
pub mod composer;
pub mod domain;
pub mod error;
pub mod insights;
pub mod language;
pub mod lines;
pub mod narrative;
pub mod report;
pub mod score;
pub mod sections;
pub mod store;

pub use aggregate::{analyze_critique, combine_analyses, merge_file_analyses};
pub use composer::calculate_file_score;
pub use domain::{AggregateReport, FileAnalysis, RawCritique, ReportStatus, Section, SectionMap};
pub use error::{CodeCriticError, Result};
pub use insights::{InsightCard, InsightKind, parse_insight_cards};
pub use language::detect_language;
pub use lines::OrderedLineSet;
pub use narrative::{HealthStatus, format_analysis, health_status};
pub use report::{ReportEnvelope, render_json, render_markdown};
pub use score::{DEFAULT_SCORE, extract_quality_score};
pub use sections::{extract_section, extract_sections};
pub use store::{CritiqueStore, StdCritiqueStore, load_critiques, parse_manifest};
