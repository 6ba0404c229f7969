//! Weighted per-file score composition.

use crate::score::{DEFAULT_SCORE, MAX_SCORE, count_indicators};

/// Architecture weight, in tenths.
pub const ARCHITECTURE_WEIGHT: i64 = 4;
/// Maintainability weight, in tenths.
pub const MAINTAINABILITY_WEIGHT: i64 = 3;
/// Technical debt weight, in tenths.
pub const TECHNICAL_DEBT_WEIGHT: i64 = 3;

const _: () = assert!(ARCHITECTURE_WEIGHT + MAINTAINABILITY_WEIGHT + TECHNICAL_DEBT_WEIGHT == 10);

/// Combine the heuristic adjustments of the three scored sections.
///
/// Each section contributes its indicator adjustment weighted 0.4, 0.3
/// and 0.3. The weighted sum moves the neutral baseline; the result is
/// clamped to 0-100 and rounded half-up.
pub fn calculate_file_score(
    architecture: &str,
    maintainability: &str,
    technical_debt: &str,
) -> u8 {
    let weighted_tenths = ARCHITECTURE_WEIGHT * adjustment(architecture)
        + MAINTAINABILITY_WEIGHT * adjustment(maintainability)
        + TECHNICAL_DEBT_WEIGHT * adjustment(technical_debt);
    let score_tenths = (i64::from(DEFAULT_SCORE) * 10 + weighted_tenths)
        .clamp(0, i64::from(MAX_SCORE) * 10);
    ((score_tenths + 5) / 10) as u8
}

fn adjustment(text: &str) -> i64 {
    i64::from(count_indicators(text).adjustment())
}
