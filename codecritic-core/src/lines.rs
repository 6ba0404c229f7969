//! Insertion-ordered set of critique lines.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Bullet markers stripped from the start of a line before comparison.
const LINE_MARKERS: [char; 2] = ['-', '•'];

/// A set of lines that keeps first-seen order.
///
/// Uniqueness is decided on the normalized line: trimmed, with a single
/// leading `-` or `•` marker removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct OrderedLineSet {
    lines: IndexSet<String>,
}

impl OrderedLineSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line, returning true if it was not already present.
    ///
    /// Lines that are blank after normalization are ignored.
    pub fn insert(&mut self, line: &str) -> bool {
        let Some(normalized) = normalize_line(line) else {
            return false;
        };
        self.lines.insert(normalized)
    }

    /// Insert every line of a section body.
    pub fn extend_from_body(&mut self, body: &str) {
        for line in body.lines() {
            self.insert(line);
        }
    }

    /// Returns true if the normalized line is present.
    pub fn contains(&self, line: &str) -> bool {
        normalize_line(line).is_some_and(|normalized| self.lines.contains(&normalized))
    }

    /// Iterate over lines in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true when the set holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// Order is part of the value: two sets with the same lines in a
// different order are not equal.
impl PartialEq for OrderedLineSet {
    fn eq(&self, other: &Self) -> bool {
        self.lines.iter().eq(other.lines.iter())
    }
}

impl Eq for OrderedLineSet {}

impl From<Vec<String>> for OrderedLineSet {
    fn from(value: Vec<String>) -> Self {
        let mut set = Self::new();
        for line in &value {
            set.insert(line);
        }
        set
    }
}

impl From<OrderedLineSet> for Vec<String> {
    fn from(value: OrderedLineSet) -> Self {
        value.lines.into_iter().collect()
    }
}

/// Normalize a line for comparison, or `None` if nothing remains.
pub fn normalize_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    let stripped = trimmed
        .strip_prefix(LINE_MARKERS)
        .unwrap_or(trimmed)
        .trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
