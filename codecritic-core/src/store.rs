//! Critique storage abstractions.

use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::domain::RawCritique;
use crate::error::Result;

/// Extensions of files holding a critique.
pub const CRITIQUE_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Abstraction over critique file access for testability.
#[cfg_attr(test, mockall::automock)]
pub trait CritiqueStore {
    /// List candidate critique files reachable from the root path.
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
    /// Read a file into a string.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Default store implementation backed by `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct StdCritiqueStore;

impl StdCritiqueStore {
    /// Create a new standard filesystem store.
    pub fn new() -> Self {
        Self
    }
}

impl CritiqueStore for StdCritiqueStore {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        collect_critique_files(root, &mut files)?;
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

// Depth-first walk that skips dot entries and keeps only critique files.
fn collect_critique_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_critique_files(&path, files)?;
        } else if file_type.is_file() && is_critique_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// List critique files under `root`, sorted by path.
pub fn list_critique_files<S: CritiqueStore>(store: &S, root: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = store
        .list_files(root)?
        .into_iter()
        .filter(|path| is_critique_file(path))
        .collect();
    files.sort();
    debug!("found {} critique files under {}", files.len(), root.display());
    Ok(files)
}

/// Load every critique under `root`, sorted by path.
pub fn load_critiques<S: CritiqueStore>(store: &S, root: &Path) -> Result<Vec<RawCritique>> {
    list_critique_files(store, root)?
        .into_iter()
        .map(|path| {
            let critique = store.read_to_string(&path)?;
            Ok(RawCritique::new(critique_file_id(root, &path), critique))
        })
        .collect()
}

/// Decode a JSON manifest of `{ "fileId", "critique" }` entries.
pub fn parse_manifest(contents: &str) -> Result<Vec<RawCritique>> {
    Ok(serde_json::from_str(contents)?)
}

/// File identifier for a critique file: its path relative to `root`
/// without the critique extension, using `/` separators.
pub fn critique_file_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = if is_critique_file(relative) {
        relative.with_extension("")
    } else {
        relative.to_path_buf()
    };
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_critique_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| CRITIQUE_EXTENSIONS.contains(&ext.as_str()))
}
