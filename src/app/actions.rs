//! File mutation pipeline for burrow.
//!
//! Create, rename and delete operate on the navigator's current directory and reload
//! the listing afterwards. Created names are sanitized and made unique; renames are
//! applied literally.

use crate::app::nav::NavState;
use crate::core::FileEntry;
use crate::core::names::{resolve_unique, sanitize};
use crate::error::{BurrowError, Result};

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Kind of entry to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Folder => "folder",
        }
    }
}

/// Outcome of a successful create.
#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub path: PathBuf,
    /// The sanitized name collided and a numbered variant was used instead.
    pub renamed: bool,
}

impl Created {
    /// Status line text, e.g. `Created file: notes-1.txt (auto-renamed)`.
    pub fn message(&self, kind: EntryKind) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.renamed {
            format!("Created {}: {} (auto-renamed)", kind.label(), name)
        } else {
            format!("Created {}: {}", kind.label(), name)
        }
    }
}

/// Creates a file or folder named after `raw` in the current directory.
///
/// The name is sanitized and numbered on collision. Files are created with
/// create-new semantics so an existing file is never truncated.
pub fn create_entry(nav: &mut NavState, raw: &str, kind: EntryKind) -> Result<Created> {
    if raw.is_empty() {
        let msg = match kind {
            EntryKind::File => "File name cannot be empty",
            EntryKind::Folder => "Folder name cannot be empty",
        };
        return Err(BurrowError::Validation(msg.to_string()));
    }

    let base = nav.current_dir().join(sanitize(raw));
    let path = resolve_unique(&base)?;
    if path.parent() != Some(nav.current_dir()) {
        return Err(BurrowError::Validation(format!(
            "Invalid name: {}",
            path.display()
        )));
    }

    let res = match kind {
        EntryKind::File => OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map(|_| ()),
        EntryKind::Folder => fs::create_dir(&path),
    };
    res.map_err(|e| BurrowError::from_io(&path, e))?;

    tracing::info!(path = %path.display(), kind = kind.label(), "created");

    if let Some(name) = path.file_name() {
        nav.reload_focused(name)?;
    }
    Ok(Created {
        renamed: path != base,
        path,
    })
}

/// Renames `target` to `raw` within its parent directory.
///
/// The new name is used verbatim but must stay a plain name: separators, `.`
/// and `..` are refused. An occupied destination is reported as
/// [BurrowError::AlreadyExists] and left untouched.
pub fn rename_entry(nav: &mut NavState, target: &FileEntry, raw: &str) -> Result<PathBuf> {
    if raw.is_empty() {
        return Err(BurrowError::Validation("Name cannot be empty".to_string()));
    }

    if raw == "." || raw == ".." || raw.chars().any(std::path::is_separator) {
        return Err(BurrowError::Validation(format!("Invalid name: {raw}")));
    }

    let old_path = target.path();
    let parent = old_path.parent().unwrap_or_else(|| Path::new(""));
    let new_path = parent.join(raw);
    if new_path.parent() != Some(parent) {
        return Err(BurrowError::Validation(format!("Invalid name: {raw}")));
    }

    if new_path == old_path {
        return Ok(new_path);
    }
    if old_path.symlink_metadata().is_err() {
        return Err(BurrowError::NotFound(old_path.to_path_buf()));
    }
    if new_path.symlink_metadata().is_ok() {
        return Err(BurrowError::AlreadyExists(new_path));
    }

    fs::rename(old_path, &new_path).map_err(|e| BurrowError::from_io(&new_path, e))?;
    tracing::info!(from = %old_path.display(), to = %new_path.display(), "renamed");

    match new_path.file_name() {
        Some(name) => nav.reload_focused(name)?,
        None => nav.reload()?,
    }
    Ok(new_path)
}

/// Deletes `target`, recursively for directories. Confirmation happens upstream.
pub fn delete_entry(nav: &mut NavState, target: &FileEntry) -> Result<()> {
    let path = target.path();

    let res = if target.is_symlink() {
        remove_link(path, target.is_dir())
    } else if target.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    res.map_err(|e| BurrowError::from_io(path, e))?;

    tracing::info!(path = %path.display(), "deleted");
    nav.reload()
}

// Only the link goes, never what it points to.
#[cfg(unix)]
fn remove_link(path: &Path, _points_to_dir: bool) -> std::io::Result<()> {
    fs::remove_file(path)
}

#[cfg(not(unix))]
fn remove_link(path: &Path, points_to_dir: bool) -> std::io::Result<()> {
    if points_to_dir {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::fs::File;
    use tempfile::tempdir;

    fn selected_name(nav: &NavState) -> Option<String> {
        nav.selected_entry().map(|e| e.name_str().into_owned())
    }

    #[test]
    fn create_file_sanitizes_and_focuses() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let mut nav = NavState::open(dir.path())?;

        let created = create_entry(&mut nav, "my notes!.txt", EntryKind::File)?;
        assert_eq!(created.path, dir.path().join("my-notes.txt"));
        assert!(!created.renamed);
        assert!(created.path.is_file());
        assert_eq!(selected_name(&nav), Some("my-notes.txt".into()));
        assert_eq!(created.message(EntryKind::File), "Created file: my-notes.txt");
        Ok(())
    }

    #[test]
    fn create_collision_is_auto_renamed() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("report.txt"), "keep me")?;
        let mut nav = NavState::open(dir.path())?;

        let created = create_entry(&mut nav, "report.txt", EntryKind::File)?;
        assert!(created.renamed);
        assert_eq!(created.path, dir.path().join("report-1.txt"));
        assert_eq!(
            fs::read_to_string(dir.path().join("report.txt"))?,
            "keep me",
            "original must not be truncated"
        );
        assert!(nav.entries().iter().any(|e| e.name() == "report-1.txt"));
        assert_eq!(
            created.message(EntryKind::File),
            "Created file: report-1.txt (auto-renamed)"
        );
        Ok(())
    }

    #[test]
    fn create_folder_and_empty_name() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let mut nav = NavState::open(dir.path())?;

        let created = create_entry(&mut nav, "new folder", EntryKind::Folder)?;
        assert!(created.path.is_dir());
        assert_eq!(selected_name(&nav), Some("new-folder".into()));

        let err = create_entry(&mut nav, "", EntryKind::Folder).err();
        assert!(
            matches!(err, Some(BurrowError::Validation(ref m)) if m == "Folder name cannot be empty")
        );
        let err = create_entry(&mut nav, "", EntryKind::File).err();
        assert!(
            matches!(err, Some(BurrowError::Validation(ref m)) if m == "File name cannot be empty")
        );
        assert_eq!(nav.entries().len(), 1, "validation must not touch the filesystem");
        Ok(())
    }

    #[test]
    fn create_dot_names_stay_in_current_dir() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let work = dir.path().join("work");
        fs::create_dir(&work)?;
        let mut nav = NavState::open(&work)?;

        let created = create_entry(&mut nav, ".", EntryKind::File)?;
        assert_eq!(created.path, work.join("untitled"));
        assert!(created.path.is_file());
        assert_eq!(selected_name(&nav), Some("untitled".into()));

        let created = create_entry(&mut nav, "..", EntryKind::Folder)?;
        assert_eq!(created.path, work.join("untitled-1"));
        assert!(created.path.is_dir());
        assert!(created.renamed);

        assert_eq!(nav.entries().len(), 2);
        assert_eq!(fs::read_dir(dir.path())?.count(), 1, "nothing lands in the parent");
        Ok(())
    }

    #[test]
    fn rename_is_literal() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("draft.txt"))?;
        let mut nav = NavState::open(dir.path())?;
        let target = nav.selected_entry().cloned().ok_or("nothing selected")?;

        let new_path = rename_entry(&mut nav, &target, "Final Draft (v2).txt")?;
        assert_eq!(new_path, dir.path().join("Final Draft (v2).txt"));
        assert!(new_path.exists());
        assert!(!dir.path().join("draft.txt").exists());
        assert_eq!(selected_name(&nav), Some("Final Draft (v2).txt".into()));
        Ok(())
    }

    #[test]
    fn rename_refuses_to_overwrite() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "a")?;
        fs::write(dir.path().join("b.txt"), "b")?;
        let mut nav = NavState::open(dir.path())?;
        let target = nav.selected_entry().cloned().ok_or("nothing selected")?;
        assert_eq!(target.name(), "a.txt");

        let err = rename_entry(&mut nav, &target, "b.txt").err();
        assert!(matches!(err, Some(BurrowError::AlreadyExists(_))));
        assert_eq!(fs::read_to_string(dir.path().join("b.txt"))?, "b");

        let err = rename_entry(&mut nav, &target, "").err();
        assert!(matches!(err, Some(BurrowError::Validation(ref m)) if m == "Name cannot be empty"));

        assert_eq!(rename_entry(&mut nav, &target, "a.txt")?, target.path());
        Ok(())
    }

    #[test]
    fn rename_stays_in_parent_directory() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let elsewhere = dir.path().join("elsewhere");
        fs::create_dir(&elsewhere)?;
        fs::write(dir.path().join("a.txt"), "a")?;
        let mut nav = NavState::open(dir.path())?;
        let target = nav
            .entries()
            .iter()
            .find(|e| e.name() == "a.txt")
            .cloned()
            .ok_or("a.txt not listed")?;

        let outside = elsewhere.join("moved.txt");
        let attempts = [
            outside.to_string_lossy().into_owned(),
            "elsewhere/moved.txt".to_string(),
            "../moved.txt".to_string(),
            "..".to_string(),
            ".".to_string(),
        ];
        for raw in &attempts {
            let err = rename_entry(&mut nav, &target, raw).err();
            assert!(
                matches!(err, Some(BurrowError::Validation(ref m)) if m.starts_with("Invalid name")),
                "{raw:?} was accepted"
            );
        }

        assert!(dir.path().join("a.txt").is_file());
        assert!(!outside.exists());
        Ok(())
    }

    #[test]
    fn rename_of_vanished_target_is_not_found() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("ghost.txt"))?;
        let mut nav = NavState::open(dir.path())?;
        let target = nav.selected_entry().cloned().ok_or("nothing selected")?;
        fs::remove_file(target.path())?;

        let err = rename_entry(&mut nav, &target, "spirit.txt").err();
        assert!(matches!(err, Some(BurrowError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn delete_removes_tree() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let tree = dir.path().join("tree");
        fs::create_dir_all(tree.join("a").join("b"))?;
        fs::write(tree.join("a").join("b").join("leaf.txt"), "leaf")?;
        fs::write(tree.join("root.txt"), "root")?;
        File::create(dir.path().join("sibling.txt"))?;

        let mut nav = NavState::open(dir.path())?;
        let target = nav.selected_entry().cloned().ok_or("nothing selected")?;
        assert_eq!(target.name(), "tree");

        delete_entry(&mut nav, &target)?;
        assert!(!tree.exists());
        assert_eq!(selected_name(&nav), Some("sibling.txt".into()));

        let file = nav.selected_entry().cloned().ok_or("nothing selected")?;
        delete_entry(&mut nav, &file)?;
        assert!(nav.entries().is_empty());
        assert!(nav.selected_entry().is_none());

        let err = delete_entry(&mut nav, &file).err();
        assert!(matches!(err, Some(BurrowError::NotFound(_))));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn delete_symlink_keeps_target() -> std::result::Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let real = dir.path().join("real");
        fs::create_dir(&real)?;
        fs::write(real.join("data.txt"), "precious")?;
        std::os::unix::fs::symlink(&real, dir.path().join("link"))?;

        let mut nav = NavState::open(dir.path())?;
        let link = nav
            .entries()
            .iter()
            .find(|e| e.name() == "link")
            .cloned()
            .ok_or("link not listed")?;
        assert!(link.is_symlink() && link.is_dir());

        delete_entry(&mut nav, &link)?;
        assert!(real.join("data.txt").exists());
        assert!(dir.path().join("link").symlink_metadata().is_err());
        Ok(())
    }
}
