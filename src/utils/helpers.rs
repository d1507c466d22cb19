//! Helpers for burrow.
//!
//! Path display helpers used by the header and status line, and start directory
//! resolution used by the entry point.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Shortens the home directory prefix of `path` to `~`.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = dirs::home_dir() {
        return shorten_with_home(path, &home_dir);
    }
    path.display().to_string()
}

fn shorten_with_home(path: &Path, home_dir: &Path) -> String {
    if let Ok(stripped) = path.strip_prefix(home_dir) {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        let mut short = stripped.display().to_string();
        if short.starts_with(MAIN_SEPARATOR) {
            short.remove(0);
        }
        return format!("~{}{}", MAIN_SEPARATOR, short);
    }
    path.display().to_string()
}

/// Resolves the directory burrow starts in.
///
/// A relative `arg` is taken from the current directory; `None` means the current
/// directory itself. The result must be a readable directory.
pub fn resolve_start_dir(arg: Option<&Path>) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let target = match arg {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd,
    };

    let target = target.canonicalize()?;
    if !target.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            format!("{} is not a directory", target.display()),
        ));
    }
    std::fs::read_dir(&target)?;
    Ok(target)
}
