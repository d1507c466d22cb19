//! Navigation state and file list logic for burrow.
//!
//! Manages the current directory, its sorted entries, the fuzzy search filter,
//! the selection and the scroll window of the file list.

use crate::core::fuzzy::{Ranker, SkimRanker};
use crate::core::{FileEntry, browse_dir, sort_entries};
use crate::error::{BurrowError, Result};

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Which entry to select after a listing is replaced.
enum Focus {
    /// Keep the current index, clamped to the new list.
    Keep,
    /// Start at the top.
    Reset,
    /// Select the entry with this exact name, falling back to the top.
    Name(OsString),
}

/// Holds the listing, filter, selection and scroll state of the file list.
///
/// `entries` is always in listing order. The filtered view is a list of indices
/// into `entries`: every entry while the query is empty, otherwise the ranked
/// matches. The selection indexes the filtered view and never wraps.
pub struct NavState {
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    shown: Vec<usize>,
    selected: usize,
    scroll_offset: usize,
    visible_rows: usize,
    query: String,
    ranker: Box<dyn Ranker>,
}

impl NavState {
    /// Creates an empty navigator positioned at `path`. Nothing is read until [NavState::load].
    pub fn new(path: PathBuf) -> Self {
        Self {
            current_dir: path,
            entries: Vec::new(),
            shown: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            visible_rows: 1,
            query: String::new(),
            ranker: Box::new(SkimRanker::default()),
        }
    }

    /// Creates a navigator and lists `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let mut nav = Self::new(path.to_path_buf());
        nav.load(path)?;
        Ok(nav)
    }

    /// Replaces the fuzzy ranking used by the search filter.
    pub fn with_ranker(mut self, ranker: Box<dyn Ranker>) -> Self {
        self.ranker = ranker;
        self.refilter();
        self.clamp_selection();
        self
    }

    // Getters / Accessors

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Every entry of the current directory, in listing order.
    #[inline]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    #[inline]
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    #[inline]
    pub fn shown_len(&self) -> usize {
        self.shown.len()
    }

    /// Entries that pass the current filter, in display order.
    pub fn shown_entries(&self) -> impl Iterator<Item = &FileEntry> + '_ {
        self.shown.iter().map(|&i| &self.entries[i])
    }

    /// Entry under the selection, if the filtered view is not empty.
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.shown
            .get(self.selected)
            .and_then(|&i| self.entries.get(i))
    }

    // Loading

    /// Lists `path` and makes it the current directory.
    ///
    /// Unreadable children are skipped. If the directory itself cannot be read the
    /// error is returned and the previous listing stays in place.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.replace_listing(path, Focus::Keep)
    }

    /// Re-reads the current directory, keeping the selection index.
    pub fn reload(&mut self) -> Result<()> {
        let dir = self.current_dir.clone();
        self.replace_listing(&dir, Focus::Keep)
    }

    /// Re-reads the current directory and selects `name` if it is shown.
    pub fn reload_focused(&mut self, name: &OsStr) -> Result<()> {
        let dir = self.current_dir.clone();
        self.replace_listing(&dir, Focus::Name(name.to_os_string()))
    }

    fn replace_listing(&mut self, path: &Path, focus: Focus) -> Result<()> {
        let mut entries = browse_dir(path).map_err(|e| BurrowError::from_io(path, e))?;
        sort_entries(&mut entries);

        self.current_dir = path.to_path_buf();
        self.entries = entries;
        self.refilter();

        match focus {
            Focus::Keep => {}
            Focus::Reset => {
                self.selected = 0;
                self.scroll_offset = 0;
            }
            Focus::Name(name) => {
                self.selected = self
                    .entries
                    .iter()
                    .position(|e| e.name() == name.as_os_str())
                    .and_then(|all_idx| self.shown.iter().position(|&i| i == all_idx))
                    .unwrap_or(0);
            }
        }

        self.clamp_selection();
        tracing::debug!(
            dir = %self.current_dir.display(),
            entries = self.entries.len(),
            "listing loaded"
        );
        Ok(())
    }

    // Filter functions

    /// Replaces the search query and recomputes the filtered view from the top.
    pub fn set_search_query(&mut self, query: &str) {
        self.query.clear();
        self.query.push_str(query);
        self.refilter();
        self.selected = 0;
        self.scroll_offset = 0;
        self.clamp_selection();
    }

    fn refilter(&mut self) {
        if self.query.is_empty() {
            self.shown = (0..self.entries.len()).collect();
            return;
        }

        let names: Vec<&str> = self.entries.iter().map(|e| e.lowercase_name()).collect();
        let query = self.query.to_lowercase();
        self.shown = self.ranker.rank(&query, &names);
        self.shown.retain(|&i| i < self.entries.len());
    }

    // Navigation functions

    /// Moves the selection by `delta`, stopping at either end.
    /// Returns `true` if the selection changed.
    pub fn move_selection(&mut self, delta: isize) -> bool {
        let len = self.shown.len();
        if len == 0 {
            self.selected = 0;
            return false;
        }

        let target = self.selected.saturating_add_signed(delta).min(len - 1);
        let moved = target != self.selected;
        self.selected = target;
        self.follow_selection();
        moved
    }

    pub fn select_first(&mut self) -> bool {
        self.move_selection(isize::MIN)
    }

    pub fn select_last(&mut self) -> bool {
        self.move_selection(isize::MAX)
    }

    /// Enters the selected directory with the selection reset to the top.
    ///
    /// Returns `false` when the selection is empty or not a directory.
    pub fn enter(&mut self) -> Result<bool> {
        let Some(target) = self
            .selected_entry()
            .filter(|e| e.is_dir())
            .map(|e| e.path().to_path_buf())
        else {
            return Ok(false);
        };

        self.replace_listing(&target, Focus::Reset)?;
        Ok(true)
    }

    /// Moves to the parent directory and re-selects the directory just left.
    ///
    /// Returns `false` at a filesystem root.
    pub fn up(&mut self) -> Result<bool> {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return Ok(false);
        };
        if parent.as_os_str().is_empty() {
            return Ok(false);
        }

        let exited = self
            .current_dir
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_default();

        self.replace_listing(&parent, Focus::Name(exited))?;
        Ok(true)
    }

    // Scroll functions

    /// Updates the number of list rows the renderer can show.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.follow_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.shown.len().saturating_sub(1));
        self.follow_selection();
    }

    /// Keeps `scroll_offset <= selected < scroll_offset + visible_rows`.
    fn follow_selection(&mut self) {
        let rows = self.visible_rows.max(1);
        let max_scroll = self.shown.len().saturating_sub(rows);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + rows {
            self.scroll_offset = self.selected + 1 - rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::seq::SliceRandom;
    use rand::{Rng, rng};
    use std::error;
    use std::result::Result;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn names(nav: &NavState) -> Vec<String> {
        nav.shown_entries()
            .map(|e| e.name_str().into_owned())
            .collect()
    }

    /// Keeps candidates containing the query, in listing order.
    struct ContainsRanker;

    impl Ranker for ContainsRanker {
        fn rank(&self, query: &str, candidates: &[&str]) -> Vec<usize> {
            candidates
                .iter()
                .enumerate()
                .filter(|(_, c)| c.contains(query))
                .map(|(i, _)| i)
                .collect()
        }
    }

    #[test]
    fn test_navstate_listing_order() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let mut dirs = vec!["src", "Docs", "assets"];
        let mut files = vec!["zebra.txt", "Apple.txt", "mango.rs", ".env"];
        dirs.shuffle(&mut rng());
        files.shuffle(&mut rng());

        for d in &dirs {
            fs::create_dir(dir.path().join(d))?;
        }
        for f in &files {
            File::create(dir.path().join(f))?;
        }

        let nav = NavState::open(dir.path())?;
        assert_eq!(
            names(&nav),
            vec!["assets", "Docs", "src", ".env", "Apple.txt", "mango.rs", "zebra.txt"]
        );
        Ok(())
    }

    #[test]
    fn test_navstate_rapid_navigation_clamps() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let file_count = 10;
        for i in 0..file_count {
            File::create(dir.path().join(format!("testfile_{i}.txt")))?;
        }

        let mut nav = NavState::open(dir.path())?;
        assert_eq!(nav.entries().len(), file_count);

        for _ in 0..1000 {
            nav.move_selection(1);
        }
        assert_eq!(nav.selected_idx(), file_count - 1, "DOWN stress must stop at the end");
        assert!(!nav.move_selection(1), "no movement past the last entry");

        for _ in 0..1000 {
            nav.move_selection(-1);
        }
        assert_eq!(nav.selected_idx(), 0, "UP stress must stop at the top");
        assert!(!nav.move_selection(-1));

        let mut rng = rng();
        for _ in 0..500 {
            nav.move_selection(rng.random_range(-25i32..=25) as isize);
            assert!(nav.selected_idx() < file_count);
            assert!(nav.selected_entry().is_some());
        }
        Ok(())
    }

    #[test]
    fn test_navstate_empty_directory() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let mut nav = NavState::open(dir.path())?;

        assert!(nav.selected_entry().is_none());
        assert!(!nav.move_selection(3));
        assert_eq!(nav.selected_idx(), 0);
        assert!(!nav.enter()?, "enter with nothing selected is a no-op");
        assert_eq!(nav.current_dir(), dir.path());
        Ok(())
    }

    #[test]
    fn test_navstate_enter_then_up_restores_selection() -> Result<(), Box<dyn error::Error>> {
        let base = tempdir()?;
        for d in ["alpha", "beta", "gamma"] {
            fs::create_dir(base.path().join(d))?;
        }
        File::create(base.path().join("beta").join("inner.txt"))?;

        let mut nav = NavState::open(base.path())?;
        nav.move_selection(1);
        assert_eq!(nav.selected_entry().map(|e| e.name_str().into_owned()), Some("beta".into()));

        for i in 0..100 {
            assert!(nav.enter()?, "iter {i}: enter failed");
            assert_eq!(nav.current_dir(), base.path().join("beta"));
            assert_eq!(nav.selected_idx(), 0);
            assert_eq!(names(&nav), vec!["inner.txt"]);

            assert!(nav.up()?, "iter {i}: up failed");
            assert_eq!(nav.current_dir(), base.path());
            assert_eq!(
                nav.selected_entry().map(|e| e.name_str().into_owned()),
                Some("beta".into()),
                "iter {i}: exited directory should be re-selected"
            );
        }
        Ok(())
    }

    #[test]
    fn test_navstate_enter_on_file_is_noop() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("notes.md"))?;

        let mut nav = NavState::open(dir.path())?;
        assert!(!nav.enter()?);
        assert_eq!(nav.current_dir(), dir.path());
        Ok(())
    }

    #[test]
    fn test_navstate_up_at_root_is_noop() -> Result<(), Box<dyn error::Error>> {
        let root = Path::new("/");
        if std::fs::read_dir(root).is_err() {
            return Ok(());
        }
        let mut nav = NavState::open(root)?;
        assert!(!nav.up()?);
        assert_eq!(nav.current_dir(), root);
        Ok(())
    }

    #[test]
    fn test_navstate_failed_load_keeps_state() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for name in ["one.txt", "two.txt", "three.txt"] {
            File::create(dir.path().join(name))?;
        }

        let mut nav = NavState::open(dir.path())?;
        nav.move_selection(2);
        let before = names(&nav);

        let err = nav.load(&dir.path().join("vanished"));
        assert!(matches!(err, Err(BurrowError::NotFound(_))));
        assert_eq!(nav.current_dir(), dir.path());
        assert_eq!(names(&nav), before);
        assert_eq!(nav.selected_idx(), 2);
        Ok(())
    }

    #[test]
    fn test_navstate_reload_is_idempotent() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("nested"))?;
        for i in 0..15 {
            File::create(dir.path().join(format!("f{i:02}.log")))?;
        }

        let mut nav = NavState::open(dir.path())?;
        nav.reload()?;
        let first: Vec<FileEntry> = nav.entries().to_vec();
        nav.reload()?;
        assert_eq!(nav.entries(), first.as_slice());
        Ok(())
    }

    #[test]
    fn test_navstate_search_filters_subset() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let mut names_in = vec![
            "main.rs",
            "lib.rs",
            "cargo.toml",
            "readme.md",
            "app.rs",
            "file_manager.rs",
            "styles.css",
        ];
        names_in.shuffle(&mut rng());
        for name in &names_in {
            fs::write(dir.path().join(name), "")?;
        }

        let mut nav = NavState::open(dir.path())?;
        nav.move_selection(4);

        nav.set_search_query("rs");
        assert_eq!(nav.selected_idx(), 0, "query change resets selection");
        let shown = names(&nav);
        assert!(!shown.is_empty());
        assert!(shown.len() <= nav.entries().len());
        for name in &shown {
            assert!(
                nav.entries().iter().any(|e| e.name_str() == name.as_str()),
                "{name} is not part of the listing"
            );
        }
        let mut dedup = shown.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), shown.len(), "filtered view has duplicates");

        nav.set_search_query("qqqq");
        assert_eq!(nav.shown_len(), 0);
        assert!(nav.selected_entry().is_none());

        nav.set_search_query("");
        let all: Vec<String> = nav.entries().iter().map(|e| e.name_str().into_owned()).collect();
        assert_eq!(names(&nav), all, "empty query shows every entry");
        Ok(())
    }

    #[test]
    fn test_navstate_custom_ranker_and_reload_focus() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for name in ["apple.txt", "banana.txt", "crab.txt", "grape.txt"] {
            fs::write(dir.path().join(name), "")?;
        }

        let mut nav = NavState::open(dir.path())?.with_ranker(Box::new(ContainsRanker));
        nav.set_search_query("ap");
        assert_eq!(names(&nav), vec!["apple.txt", "grape.txt"]);

        nav.reload_focused(OsStr::new("grape.txt"))?;
        assert_eq!(
            nav.selected_entry().map(|e| e.name_str().into_owned()),
            Some("grape.txt".into()),
            "focus should map into the filtered view"
        );

        nav.reload_focused(OsStr::new("banana.txt"))?;
        assert_eq!(nav.selected_idx(), 0, "hidden focus target falls back to the top");
        Ok(())
    }

    #[test]
    fn test_navstate_scroll_follows_selection() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        for i in 0..50 {
            File::create(dir.path().join(format!("row_{i:02}")))?;
        }

        let mut nav = NavState::open(dir.path())?;
        nav.set_visible_rows(10);

        let mut rng = rng();
        for _ in 0..300 {
            nav.move_selection(rng.random_range(-15i32..=15) as isize);
            let (sel, off, rows) = (nav.selected_idx(), nav.scroll_offset(), nav.visible_rows());
            assert!(off <= sel && sel < off + rows, "sel {sel} outside [{off}, {off}+{rows})");
        }

        nav.select_last();
        assert_eq!(nav.selected_idx(), 49);
        assert_eq!(nav.scroll_offset(), 40);

        nav.set_visible_rows(100);
        assert_eq!(nav.scroll_offset(), 0, "everything fits, nothing to scroll");

        nav.set_visible_rows(5);
        nav.select_first();
        assert_eq!(nav.scroll_offset(), 0);
        Ok(())
    }
}
