//! Parsing of the report narrative into presentation cards.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sections::BLOCK_DELIMITER;

const LIST_PREFIXES: [&str; 3] = ["PRINCIPAIS", "OPORTUNIDADES", "RECOMENDAÇÕES"];

/// Kind of a narrative card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Free text overview.
    Overview,
    /// Bullet list of findings.
    List,
    /// Per-file details.
    Details,
}

/// A titled section of the narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InsightCard {
    /// Card kind.
    pub kind: InsightKind,
    /// Header line of the section.
    pub title: String,
    /// Body lines. List items have their bullet marker removed.
    pub body: Vec<String>,
}

/// Split a narrative into cards by section header.
///
/// The details section closes the narrative: once it opens, every later
/// block belongs to it, whatever its first line looks like. Unrecognised
/// blocks before it are skipped.
pub fn parse_insight_cards(narrative: &str) -> Vec<InsightCard> {
    let mut cards: Vec<InsightCard> = Vec::new();
    for block in narrative.split(BLOCK_DELIMITER) {
        let block = block.trim();
        if let Some(details) = cards
            .last_mut()
            .filter(|card| card.kind == InsightKind::Details)
        {
            details.body.extend(block.lines().map(str::to_string));
            continue;
        }

        let mut lines = block.lines();
        let Some(title) = lines.next() else {
            continue;
        };
        match classify(title) {
            Some(InsightKind::List) => cards.push(InsightCard {
                kind: InsightKind::List,
                title: title.to_string(),
                body: lines.map(strip_bullet).collect(),
            }),
            Some(kind) => cards.push(InsightCard {
                kind,
                title: title.to_string(),
                body: lines.map(str::to_string).collect(),
            }),
            None => {}
        }
    }
    cards
}

fn classify(title: &str) -> Option<InsightKind> {
    if title.starts_with("VISÃO GERAL") {
        Some(InsightKind::Overview)
    } else if LIST_PREFIXES.iter().any(|prefix| title.starts_with(prefix)) {
        Some(InsightKind::List)
    } else if title.starts_with("DETALHES") {
        Some(InsightKind::Details)
    } else {
        None
    }
}

fn strip_bullet(line: &str) -> String {
    let trimmed = line.trim();
    trimmed
        .strip_prefix('•')
        .or_else(|| trimmed.strip_prefix('-'))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
