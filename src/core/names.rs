//! Name sanitizing and collision-free path resolution for new files and folders.

use crate::error::{BurrowError, Result};
use std::path::{Path, PathBuf};

/// Name used when sanitizing leaves nothing behind.
pub const FALLBACK_NAME: &str = "untitled";

/// Upper bound on numbered candidates tried by [resolve_unique].
pub const MAX_UNIQUE_ATTEMPTS: u32 = 10_000;

/// Turns free-form user input into a safe file name.
///
/// Spaces become hyphens, anything outside `[A-Za-z0-9._-]` is dropped, hyphen runs
/// collapse to one and leading/trailing hyphens are trimmed. An empty result, or one
/// made only of dots (`.`, `..`), becomes [FALLBACK_NAME].
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for c in raw.chars() {
        let c = if c == ' ' { '-' } else { c };
        if !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')) {
            continue;
        }
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches('-');
    if trimmed.chars().all(|c| c == '.') {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Returns `base` if nothing exists there, otherwise the first free `stem-N.ext`.
///
/// Example: "notes.txt" -> "notes-1.txt" -> "notes-2.txt"
pub fn resolve_unique(base: &Path) -> Result<PathBuf> {
    if !exists(base) {
        return Ok(base.to_path_buf());
    }

    let parent = base.parent().unwrap_or_else(|| Path::new(""));
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = base
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    for counter in 1..=MAX_UNIQUE_ATTEMPTS {
        let candidate = parent.join(format!("{stem}-{counter}{ext}"));
        if !exists(&candidate) {
            return Ok(candidate);
        }
    }

    Err(BurrowError::ResourceExhausted {
        path: base.to_path_buf(),
        attempts: MAX_UNIQUE_ATTEMPTS,
    })
}

// Dangling symlinks still occupy the name.
fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
