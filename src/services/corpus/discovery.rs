//! Reference Document Discovery
//!
//! Flat filesystem scan of the corpus directory. Unreadable files are logged
//! and skipped; a single bad file never aborts a load.

use std::path::{Path, PathBuf};

use crate::utils::error::AppResult;

/// File extensions recognized as reference source documents
const SOURCE_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// A source document read from the corpus directory (before parsing)
#[derive(Debug, Clone)]
pub struct DiscoveredReference {
    pub path: PathBuf,
    pub content: String,
}

/// Scan the corpus directory (non-recursive) and read every recognized
/// source document.
///
/// Fails only when the directory itself cannot be read; per-file read
/// failures are logged and skipped.
pub fn discover_reference_files(dir: &Path) -> AppResult<Vec<DiscoveredReference>> {
    let mut discovered = Vec::new();

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_source_extension(path))
        .collect();

    // Deterministic corpus order regardless of directory iteration order
    entries.sort();

    for path in entries {
        match std::fs::read_to_string(&path) {
            Ok(content) => discovered.push(DiscoveredReference { path, content }),
            Err(e) => {
                tracing::warn!("Failed to read reference file {}: {}", path.display(), e);
            }
        }
    }

    Ok(discovered)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
