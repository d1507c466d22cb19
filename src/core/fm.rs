//! File and directory browsing logic for burrow.
//!
//! Provides the [FileEntry] snapshot used throughout burrow, the [browse_dir] listing
//! function and the canonical listing order applied by [sort_entries].

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Immutable snapshot of a single filesystem node.
///
/// Created by stat-ing a path (following symlinks). The absolute path always equals
/// the parent directory joined with the name.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    path: PathBuf,
    flags: u8,
    size: u64,
    modified: Option<SystemTime>,
    mode: u32,
    lowercase_name: Box<str>,
}

impl FileEntry {
    // Flag bit definitions
    pub(crate) const IS_DIR: u8 = 1 << 0;
    pub(crate) const IS_HIDDEN: u8 = 1 << 1;
    pub(crate) const IS_SYMLINK: u8 = 1 << 2;
    pub(crate) const IS_EXECUTABLE: u8 = 1 << 3;

    #[cfg(unix)]
    const EXEC_FLAG: u32 = 0o111;

    /// Stats `path` and builds an entry for it.
    ///
    /// Symlinks are followed for size, kind and timestamps; the entry still remembers
    /// that the node itself is a link. Paths without a final component (a filesystem
    /// root) are rejected.
    pub fn from_path(path: &Path) -> io::Result<FileEntry> {
        let Some(name) = path.file_name() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            ));
        };

        let link_md = fs::symlink_metadata(path)?;
        let md = if link_md.file_type().is_symlink() {
            fs::metadata(path)?
        } else {
            link_md.clone()
        };

        let mut flags = 0u8;
        if md.is_dir() {
            flags |= Self::IS_DIR;
        }
        if link_md.file_type().is_symlink() {
            flags |= Self::IS_SYMLINK;
        }
        if name.to_string_lossy().starts_with('.') {
            flags |= Self::IS_HIDDEN;
        }

        let mode = permission_bits(&md);
        #[cfg(unix)]
        if !md.is_dir() && mode & Self::EXEC_FLAG != 0 {
            flags |= Self::IS_EXECUTABLE;
        }

        Ok(FileEntry {
            lowercase_name: name.to_string_lossy().to_lowercase().into_boxed_str(),
            path: path.to_path_buf(),
            flags,
            size: if md.is_dir() { 0 } else { md.len() },
            modified: md.modified().ok(),
            mode,
        })
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        // from_path guarantees a final component
        self.path.file_name().unwrap_or_default()
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name().to_string_lossy()
    }

    #[inline]
    pub(crate) fn lowercase_name(&self) -> &str {
        &self.lowercase_name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Permission bits (`st_mode & 0o7777` on unix, `0o444`/`0o666` elsewhere).
    #[inline]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.flags & Self::IS_EXECUTABLE != 0
    }
}

#[cfg(unix)]
fn permission_bits(md: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(md: &Metadata) -> u32 {
    if md.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

/// Reads the contents of the provided directory.
///
/// Entries that fail to stat (dangling symlinks, races with deletion) are skipped.
/// Fails only when the directory itself cannot be read.
pub fn browse_dir(path: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::with_capacity(256);

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        match FileEntry::from_path(&path.join(entry.file_name())) {
            Ok(fe) => entries.push(fe),
            Err(_) => continue,
        }
    }
    Ok(entries)
}

/// Sorts entries into listing order: directories first, then case-insensitive by name.
///
/// Names equal ignoring case fall back to an exact comparison so the order is total.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(compare_entries);
}

fn compare_entries(a: &FileEntry, b: &FileEntry) -> Ordering {
    match (a.is_dir(), b.is_dir()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }
    a.lowercase_name()
        .cmp(b.lowercase_name())
        .then_with(|| a.name().cmp(b.name()))
}
