//! Section extraction from free-form critiques.
//!
//! A critique is read as a sequence of blocks separated by a blank line.
//! A block belongs to a section when its first line starts with the
//! section title. Extraction never fails: absent sections are empty.

use crate::domain::{Section, SectionMap};

/// Delimiter between blocks of a critique.
pub(crate) const BLOCK_DELIMITER: &str = "\n\n";

/// Return the body of the first block titled `title`, or an empty string.
///
/// The title line is dropped; the remaining lines are trimmed, blank lines
/// are removed and the rest is joined with `\n`.
pub fn extract_section(text: &str, title: &str) -> String {
    for block in text.split(BLOCK_DELIMITER) {
        let mut lines = block.lines().skip_while(|line| line.is_empty());
        let Some(first) = lines.next() else {
            continue;
        };
        if !first.starts_with(title) {
            continue;
        }
        return lines
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
    }
    String::new()
}

/// Extract all five sections of a critique.
pub fn extract_sections(text: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    for section in Section::ALL {
        sections.set(section, extract_section(text, section.title()));
    }
    sections
}
