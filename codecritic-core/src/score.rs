//! Quality score extraction.
//!
//! Critiques may state their own `Score: N` figures. When they do, the
//! rounded mean of those figures is the score. Otherwise a keyword
//! heuristic counts positive and negative quality indicators around a
//! neutral baseline.

use std::num::ParseIntError;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::sections::BLOCK_DELIMITER;

/// Neutral score, also returned when a critique cannot be read.
pub const DEFAULT_SCORE: u8 = 70;
/// Points added or removed per matched indicator term.
pub const INDICATOR_POINTS: i32 = 5;
/// Highest possible score.
pub const MAX_SCORE: u8 = 100;

/// Terms that signal good quality.
pub const POSITIVE_INDICATORS: [&str; 10] = [
    "excelente",
    "robusto",
    "modular",
    "testado",
    "escalável",
    "eficiente",
    "seguro",
    "documentado",
    "bem estruturado",
    "otimizado",
];

/// Terms that signal poor quality.
pub const NEGATIVE_INDICATORS: [&str; 10] = [
    "complexo",
    "confuso",
    "duplicado",
    "frágil",
    "acoplado",
    "obsoleto",
    "inseguro",
    "lento",
    "problemático",
    "não testado",
];

static SCORE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Score:\s*([0-9]+)").expect("score token pattern is valid"));

/// Distinct indicator terms found in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorCounts {
    /// Number of distinct positive terms present.
    pub positive: u32,
    /// Number of distinct negative terms present.
    pub negative: u32,
}

impl IndicatorCounts {
    /// Unclamped score adjustment implied by the counts.
    pub fn adjustment(&self) -> i32 {
        (self.positive as i32 - self.negative as i32) * INDICATOR_POINTS
    }
}

/// Compute a 0-100 score for a block of critique text.
///
/// Never fails: unreadable score figures fall back to [`DEFAULT_SCORE`].
pub fn extract_quality_score(text: &str) -> u8 {
    explicit_score(text).unwrap_or_else(|| heuristic_score(text))
}

/// Rounded mean of the explicit `Score: N` figures in `text`.
///
/// Returns `None` when the text carries no figure, and [`DEFAULT_SCORE`]
/// when a figure cannot be represented.
pub fn explicit_score(text: &str) -> Option<u8> {
    match explicit_scores(text) {
        Ok(scores) => rounded_mean(scores.iter().map(|score| u64::from(*score))).map(clamp_score),
        Err(err) => {
            debug!("unreadable score figure, using default score: {err}");
            Some(DEFAULT_SCORE)
        }
    }
}

/// Keyword heuristic score: the baseline moved by matched indicators.
pub fn heuristic_score(text: &str) -> u8 {
    let counts = count_indicators(text);
    clamp_score(i64::from(DEFAULT_SCORE) + i64::from(counts.adjustment()))
}

/// Count distinct indicator terms present in the lowercased text.
pub fn count_indicators(text: &str) -> IndicatorCounts {
    let lowered = text.to_lowercase();
    IndicatorCounts {
        positive: count_present(&lowered, &POSITIVE_INDICATORS),
        negative: count_present(&lowered, &NEGATIVE_INDICATORS),
    }
}

fn count_present(text: &str, terms: &[&str]) -> u32 {
    terms.iter().filter(|term| text.contains(**term)).count() as u32
}

fn explicit_scores(text: &str) -> Result<Vec<u32>, ParseIntError> {
    let mut scores = Vec::new();
    for block in text.split(BLOCK_DELIMITER) {
        if !block.contains("Score:") {
            continue;
        }
        for captures in SCORE_TOKEN.captures_iter(block) {
            scores.push(captures[1].parse::<u32>()?);
        }
    }
    Ok(scores)
}

/// Mean rounded half-up, or `None` for no values.
pub(crate) fn rounded_mean(values: impl IntoIterator<Item = u64>) -> Option<u64> {
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        return None;
    }
    Some((2 * sum + count) / (2 * count))
}

pub(crate) fn clamp_score<T: TryInto<i64>>(value: T) -> u8 {
    let value = value.try_into().unwrap_or(i64::MAX);
    value.clamp(0, i64::from(MAX_SCORE)) as u8
}
