//! Input mode types for burrow.
//!
//! Exactly one [ModeState] is active at a time. Popups carry their own input buffer
//! and, for rename and delete, the entry they act on.

use crate::core::FileEntry;

/// Describes the current mode for key handling and rendering.
///
/// Variants:
/// * `Normal` - Default browsing mode.
/// * `Search` - Live fuzzy filtering of the current directory.
/// * `Popup` - Modal prompt for a file operation, see [Popup].
/// * `Help` - Key binding overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModeState {
    #[default]
    Normal,
    Search,
    Popup(Popup),
    Help,
}

/// Enumerates the file operations that are confirmed through a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    CreateFile,
    CreateFolder,
    Rename,
    Delete,
}

impl PopupKind {
    /// Whether the popup collects text (everything except the delete confirmation).
    #[inline]
    pub fn takes_text(self) -> bool {
        !matches!(self, PopupKind::Delete)
    }
}

/// An open popup: its kind, labels, input buffer and bound target entry.
///
/// The target is fixed when the popup opens and cannot change until it closes.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    kind: PopupKind,
    title: String,
    prompt: String,
    input: InputBuffer,
    target: Option<FileEntry>,
}

impl Popup {
    pub fn create_file() -> Self {
        Self::new(PopupKind::CreateFile, " New File ", "New file name: ", None)
    }

    pub fn create_folder() -> Self {
        Self::new(PopupKind::CreateFolder, " New Folder ", "New folder name: ", None)
    }

    /// Rename prompt pre-filled with the target's current name.
    pub fn rename(target: FileEntry) -> Self {
        let mut popup = Self::new(PopupKind::Rename, " Rename ", "Rename to: ", None);
        popup.input = InputBuffer::with_text(&target.name_str());
        popup.target = Some(target);
        popup
    }

    pub fn delete(target: FileEntry) -> Self {
        let prompt = format!("Delete '{}'? (y/N): ", target.name_str());
        Self::new(PopupKind::Delete, " Confirm Delete ", &prompt, Some(target))
    }

    fn new(kind: PopupKind, title: &str, prompt: &str, target: Option<FileEntry>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            prompt: prompt.to_string(),
            input: InputBuffer::default(),
            target,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn kind(&self) -> PopupKind {
        self.kind
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[inline]
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    #[inline]
    pub fn target(&self) -> Option<&FileEntry> {
        self.target.as_ref()
    }

    #[inline]
    pub(crate) fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }
}

/// Single-line text buffer with a byte cursor that always sits on a char boundary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inserts a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some((previous, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.remove(previous);
            self.cursor = previous;
        }
    }

    pub fn move_left(&mut self) {
        if let Some((previous, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = previous;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }
}
