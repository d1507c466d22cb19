//! Input action handler methods for burrow.
//!
//! This module implements [AppState] methods that process key events for each mode
//! and run the navigation, file and system actions they map to.

use crate::app::actions::{EntryKind, create_entry, delete_entry, rename_entry};
use crate::app::keymap::{Action, FileAction, NavAction, SystemAction};
use crate::app::mode::{ModeState, Popup, PopupKind};
use crate::app::state::{AppState, ExitAction, KeypressResult};
use crate::core::proc::validate_target;
use crate::error::BurrowError;

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};
use std::path::PathBuf;

/// AppState input and action handlers
impl<'a> AppState<'a> {
    // Mode handlers

    /// Normal mode: everything goes through the keymap.
    pub(super) fn handle_normal_mode(&mut self, key: KeyEvent) -> KeypressResult {
        match self.keymap.lookup(key) {
            Some(Action::Nav(action)) => self.handle_nav_action(action),
            Some(Action::File(action)) => self.handle_file_action(action),
            Some(Action::System(action)) => self.handle_sys_action(action),
            None => KeypressResult::Continue,
        }
    }

    /// Search mode: printable keys edit the query, arrows move, Enter opens, Esc leaves.
    pub(super) fn handle_search_mode(&mut self, key: KeyEvent) -> KeypressResult {
        match key.code {
            Esc => {
                self.set_mode(ModeState::Normal);
                KeypressResult::Consumed
            }

            Enter => self.open_from_search(),

            Up => {
                self.nav.move_selection(-1);
                KeypressResult::Consumed
            }

            Down => {
                self.nav.move_selection(1);
                KeypressResult::Consumed
            }

            Backspace => {
                let mut query = self.nav.query().to_string();
                if query.pop().is_some() {
                    self.nav.set_search_query(&query);
                }
                KeypressResult::Consumed
            }

            Char(c) if !has_command_modifier(key.modifiers) => {
                let mut query = self.nav.query().to_string();
                query.push(c);
                self.nav.set_search_query(&query);
                KeypressResult::Consumed
            }

            _ => KeypressResult::Consumed,
        }
    }

    /// Popup mode: text editing for the prompts, a single decision key for delete.
    pub(super) fn handle_popup_mode(&mut self, key: KeyEvent) -> KeypressResult {
        let ModeState::Popup(popup) = &mut self.mode else {
            return KeypressResult::Continue;
        };

        if popup.kind() == PopupKind::Delete {
            match key.code {
                Char('y') | Char('Y') if !has_command_modifier(key.modifiers) => {
                    self.confirm_delete()
                }
                Char(_) | Enter | Esc => self.set_mode(ModeState::Normal),
                _ => {}
            }
            return KeypressResult::Consumed;
        }

        let input = popup.input_mut();
        match key.code {
            Enter => self.commit_popup(),
            Esc => self.set_mode(ModeState::Normal),
            Left => input.move_left(),
            Right => input.move_right(),
            Home => input.home(),
            End => input.end(),
            Backspace => input.backspace(),
            Char(c) if !has_command_modifier(key.modifiers) => input.insert(c),
            _ => {}
        }
        KeypressResult::Consumed
    }

    /// Help mode: Esc or the help key closes the overlay, everything else is swallowed.
    pub(super) fn handle_help_mode(&mut self, key: KeyEvent) -> KeypressResult {
        let closes = key.code == Esc
            || matches!(
                self.keymap.lookup(key),
                Some(Action::System(SystemAction::KeyBindHelp))
            );
        if closes {
            self.set_mode(ModeState::Normal);
        }
        KeypressResult::Consumed
    }

    // Action handlers

    fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        let page = self.metrics.list_rows.max(1) as isize;
        match action {
            NavAction::GoUp => {
                self.nav.move_selection(-1);
            }
            NavAction::GoDown => {
                self.nav.move_selection(1);
            }
            NavAction::PageUp => {
                self.nav.move_selection(-page);
            }
            NavAction::PageDown => {
                self.nav.move_selection(page);
            }
            NavAction::GoToTop => {
                self.nav.select_first();
            }
            NavAction::GoToBottom => {
                self.nav.select_last();
            }
            NavAction::GoParent => {
                if let Err(e) = self.nav.up() {
                    self.set_status_error(format!("Cannot access parent directory: {e}"));
                }
            }
            NavAction::GoIntoDir => {
                if let Err(e) = self.nav.enter() {
                    self.set_status_error(format!("Cannot read directory: {e}"));
                }
            }
        }
        KeypressResult::Consumed
    }

    fn handle_file_action(&mut self, action: FileAction) -> KeypressResult {
        match action {
            FileAction::Open => return self.open_selected(),
            FileAction::Search => {
                self.nav.set_search_query("");
                self.set_mode(ModeState::Search);
            }
            FileAction::Create => self.set_mode(ModeState::Popup(Popup::create_file())),
            FileAction::CreateDirectory => {
                self.set_mode(ModeState::Popup(Popup::create_folder()))
            }
            FileAction::Rename => {
                if let Some(target) = self.nav.selected_entry().cloned() {
                    self.set_mode(ModeState::Popup(Popup::rename(target)));
                }
            }
            FileAction::Delete => {
                if let Some(target) = self.nav.selected_entry().cloned() {
                    self.set_mode(ModeState::Popup(Popup::delete(target)));
                }
            }
        }
        KeypressResult::Consumed
    }

    fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::KeyBindHelp => {
                self.set_mode(ModeState::Help);
                KeypressResult::Consumed
            }
            SystemAction::Quit => self.quit(),
        }
    }

    // Helpers

    /// Enters the selected directory or hands the selected file to the editor.
    fn open_selected(&mut self) -> KeypressResult {
        let Some(entry) = self.nav.selected_entry() else {
            return KeypressResult::Consumed;
        };

        if entry.is_dir() {
            if let Err(e) = self.nav.enter() {
                self.set_status_error(format!("Cannot read directory: {e}"));
            }
            return KeypressResult::Consumed;
        }

        let file = entry.path().to_path_buf();
        self.open_file(file)
    }

    /// Search-mode Enter. Entering a directory also leaves Search.
    fn open_from_search(&mut self) -> KeypressResult {
        let Some(entry) = self.nav.selected_entry() else {
            return KeypressResult::Consumed;
        };

        if entry.is_dir() {
            match self.nav.enter() {
                Ok(_) => self.set_mode(ModeState::Normal),
                Err(e) => self.set_status_error(format!("Cannot read directory: {e}")),
            }
            return KeypressResult::Consumed;
        }

        let file = entry.path().to_path_buf();
        self.open_file(file)
    }

    /// Resolves the editor and ends the session with it, or reports why it can't.
    fn open_file(&mut self, file: PathBuf) -> KeypressResult {
        match self.config.editor().resolve() {
            Ok(command) => {
                let then_inherit = self
                    .config
                    .inherit_dir()
                    .then(|| self.nav.current_dir().to_path_buf());
                KeypressResult::Exit(ExitAction::OpenEditor {
                    command,
                    file,
                    then_inherit,
                })
            }
            Err(e) => {
                self.set_status_error(e.to_string());
                KeypressResult::Consumed
            }
        }
    }

    /// Quits, handing the current directory to the shell when inheritance is on.
    ///
    /// A directory that vanished since it was listed downgrades the exit to a plain
    /// quit with a notice printed after the terminal is restored.
    fn quit(&mut self) -> KeypressResult {
        if !self.config.inherit_dir() {
            return KeypressResult::Exit(ExitAction::Quit);
        }

        let dir = self.nav.current_dir().to_path_buf();
        match validate_target(&dir) {
            Ok(()) => KeypressResult::Exit(ExitAction::InheritDirectory(dir)),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "cannot inherit directory");
                self.exit_notice = Some(e.to_string());
                KeypressResult::Exit(ExitAction::Quit)
            }
        }
    }

    /// Applies a text popup. The popup closes whatever the outcome.
    fn commit_popup(&mut self) {
        let ModeState::Popup(popup) = std::mem::take(&mut self.mode) else {
            return;
        };
        let text = popup.input().text();

        match popup.kind() {
            PopupKind::CreateFile | PopupKind::CreateFolder => {
                let kind = if popup.kind() == PopupKind::CreateFile {
                    EntryKind::File
                } else {
                    EntryKind::Folder
                };
                match create_entry(&mut self.nav, text, kind) {
                    Ok(created) => self.set_status_info(created.message(kind)),
                    Err(BurrowError::Validation(msg)) => self.set_status_error(msg),
                    Err(e) => self.set_status_error(format!("Cannot create {}: {e}", kind.label())),
                }
            }
            PopupKind::Rename => {
                let Some(target) = popup.target() else {
                    return;
                };
                match rename_entry(&mut self.nav, target, text) {
                    Ok(path) => {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        self.set_status_info(format!("Renamed to: {name}"));
                    }
                    Err(BurrowError::Validation(msg)) => self.set_status_error(msg),
                    Err(e) => self.set_status_error(format!("Cannot rename: {e}")),
                }
            }
            PopupKind::Delete => {}
        }
    }

    fn confirm_delete(&mut self) {
        let ModeState::Popup(popup) = std::mem::take(&mut self.mode) else {
            return;
        };
        let Some(target) = popup.target() else {
            return;
        };

        match delete_entry(&mut self.nav, target) {
            Ok(()) => self.set_status_info(format!("Deleted: {}", target.name_str())),
            Err(e) => self.set_status_error(format!("Cannot delete: {e}")),
        }
    }
}

// Ctrl/Alt chords are commands, not text.
fn has_command_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
