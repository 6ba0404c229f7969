//! Language tagging for critiqued files.

use std::path::Path;

use tokei::LanguageType;

/// Detect the language of a file from its identifier's extension.
///
/// Only the identifier is inspected; the file is never opened.
pub fn detect_language(file_id: &str) -> Option<String> {
    let extension = Path::new(file_id)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_lowercase();
    LanguageType::from_file_extension(&extension).map(|language| language.to_string())
}
