//! Application state and main controller module for burrow.
//!
//! [AppState] owns everything the event loop mutates: the navigator, the active
//! input mode, the status message and the current layout metrics. It borrows the
//! startup [Config] and turns key events into state changes or an [ExitAction]
//! telling the entry point how the session ends.

use crate::app::keymap::Keymap;
use crate::app::mode::ModeState;
use crate::app::nav::NavState;
use crate::app::status::StatusMessage;
use crate::config::{Config, EditorCommand};
use crate::error::Result;

use crossterm::event::KeyEvent;

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Rows taken by the header, details line and status line.
pub const CHROME_ROWS: u16 = 3;

/// Result of processing a single key event.
#[derive(Debug, PartialEq)]
pub enum KeypressResult {
    /// No binding matched.
    Continue,
    /// The key was handled by the active mode.
    Consumed,
    /// The session is over.
    Exit(ExitAction),
}

/// How the session ends once the terminal has been restored.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitAction {
    /// Plain exit with status 0.
    Quit,
    /// Replace the process with the shell, positioned in this directory.
    InheritDirectory(PathBuf),
    /// Run the editor on `file`, then inherit `then_inherit` if set.
    OpenEditor {
        command: EditorCommand,
        file: PathBuf,
        then_inherit: Option<PathBuf>,
    },
}

/// Size of the terminal and the number of file rows that fit in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub width: u16,
    pub height: u16,
    pub list_rows: usize,
}

impl LayoutMetrics {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            list_rows: usize::from(height.saturating_sub(CHROME_ROWS)).max(1),
        }
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// Main struct which holds the central application state of burrow.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,

    pub(super) metrics: LayoutMetrics,

    pub(super) nav: NavState,
    pub(super) mode: ModeState,

    pub(super) status: Option<StatusMessage>,
    pub(super) exit_notice: Option<String>,
}

impl<'a> AppState<'a> {
    /// Builds the state and lists `initial_path`.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> Result<Self> {
        let metrics = LayoutMetrics::default();
        let mut nav = NavState::open(initial_path)?;
        nav.set_visible_rows(metrics.list_rows);

        Ok(Self {
            config,
            keymap: Keymap::from_config(config),
            metrics,
            nav,
            mode: ModeState::Normal,
            status: None,
            exit_notice: None,
        })
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn mode(&self) -> &ModeState {
        &self.mode
    }

    #[inline]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[inline]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// Message to print once the terminal is restored, if the exit was degraded.
    pub fn take_exit_notice(&mut self) -> Option<String> {
        self.exit_notice.take()
    }

    // Status functions

    pub fn set_status_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::info(text));
    }

    pub fn set_status_error(&mut self, text: impl Into<String>) {
        let msg = StatusMessage::error(text);
        tracing::warn!(text = msg.text(), "status error");
        self.status = Some(msg);
    }

    /// When the current status message expires, if one is showing.
    pub fn status_deadline(&self) -> Option<Instant> {
        self.status.as_ref().map(StatusMessage::expires_at)
    }

    /// Text for the status line and whether it is an error.
    pub fn status_line(&self) -> (String, bool) {
        if let Some(msg) = &self.status {
            return (msg.text().to_string(), msg.is_error());
        }

        let text = match &self.mode {
            ModeState::Normal if self.config.inherit_dir() => {
                "[Ready - AutoCD] • q:inherit directory /:search Ctrl+n:new file ?:help".to_string()
            }
            ModeState::Normal => "[Ready] • q:quit /:search Ctrl+n:new file ?:help".to_string(),
            ModeState::Search => format!(
                "Search: {} • {} matches • Enter:open Esc:cancel",
                self.nav.query(),
                self.nav.shown_len()
            ),
            ModeState::Popup(popup) if popup.kind().takes_text() => {
                "Enter:confirm Esc:cancel".to_string()
            }
            ModeState::Popup(_) => "y:delete • any other key:cancel".to_string(),
            ModeState::Help => "Help • Esc/?:close".to_string(),
        };
        (text, false)
    }

    /// Drops the status message once it has expired.
    ///
    /// Returns `true` if the screen needs a redraw.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> bool {
        if self.status.as_ref().is_some_and(|m| m.is_expired(now)) {
            self.status = None;
            return true;
        }
        false
    }

    // Layout

    /// Stores new layout metrics and keeps the selection inside the visible rows.
    pub fn update_layout_metrics(&mut self, metrics: LayoutMetrics) {
        if self.metrics != metrics {
            self.metrics = metrics;
            self.nav.set_visible_rows(metrics.list_rows);
        }
    }

    /// Terminal resize: layout only, the mode is untouched.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.update_layout_metrics(LayoutMetrics::new(width, height));
    }

    // Mode functions

    /// Switches modes. Leaving Search clears its query.
    pub(crate) fn set_mode(&mut self, next: ModeState) {
        if matches!(self.mode, ModeState::Search) && !matches!(next, ModeState::Search) {
            self.nav.set_search_query("");
        }
        tracing::debug!(from = mode_name(&self.mode), to = mode_name(&next), "mode change");
        self.mode = next;
    }

    /// Central key handler: one dispatch function per mode.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        match self.mode {
            ModeState::Normal => self.handle_normal_mode(key),
            ModeState::Search => self.handle_search_mode(key),
            ModeState::Popup(_) => self.handle_popup_mode(key),
            ModeState::Help => self.handle_help_mode(key),
        }
    }
}

fn mode_name(mode: &ModeState) -> &'static str {
    match mode {
        ModeState::Normal => "normal",
        ModeState::Search => "search",
        ModeState::Popup(_) => "popup",
        ModeState::Help => "help",
    }
}
