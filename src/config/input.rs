//! Input configuration for burrow.
//!
//! Holds the default key bindings as key-spec strings (parsed by the keymap) and the
//! external editor and shell taken from the environment.

use crate::error::{BurrowError, Result};
use std::path::PathBuf;

/// Key-spec lists for every bindable action.
#[derive(Debug, Clone)]
pub struct Keys {
    open_file: Vec<String>,
    go_up: Vec<String>,
    go_down: Vec<String>,
    go_parent: Vec<String>,
    go_into_dir: Vec<String>,
    go_to_top: Vec<String>,
    go_to_bottom: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    search: Vec<String>,
    create: Vec<String>,
    create_directory: Vec<String>,
    rename: Vec<String>,
    delete: Vec<String>,
    keybind_help: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    open_file,
    go_up,
    go_down,
    go_parent,
    go_into_dir,
    go_to_top,
    go_to_bottom,
    page_up,
    page_down,
    search,
    create,
    create_directory,
    rename,
    delete,
    keybind_help,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            open_file: vec!["Enter".into(), "Ctrl+o".into()],
            go_up: vec!["k".into(), "Up".into()],
            go_down: vec!["j".into(), "Down".into()],
            go_parent: vec!["h".into(), "Left".into(), "Backspace".into()],
            go_into_dir: vec!["l".into(), "Right".into()],
            go_to_top: vec!["Home".into()],
            go_to_bottom: vec!["End".into()],
            page_up: vec!["PageUp".into()],
            page_down: vec!["PageDown".into()],

            search: vec!["/".into()],

            create: vec!["Ctrl+n".into()],
            create_directory: vec!["Ctrl+f".into()],
            rename: vec!["Ctrl+r".into()],
            delete: vec!["Ctrl+d".into()],

            keybind_help: vec!["?".into()],
            quit: vec!["q".into(), "Ctrl+c".into()],
        }
    }
}

/// External editor command, as found in `$EDITOR` or `$VISUAL`.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    cmd: Option<String>,
}

/// A resolved editor invocation: program on `PATH` plus any configured arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Editor {
    pub fn new(cmd: Option<String>) -> Self {
        let cmd = cmd
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Editor { cmd }
    }

    pub fn from_env() -> Self {
        let cmd = std::env::var("EDITOR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| std::env::var("VISUAL").ok());
        Self::new(cmd)
    }

    #[inline]
    pub fn cmd(&self) -> Option<&str> {
        self.cmd.as_deref()
    }

    /// Splits the configured command and locates its program on `PATH`.
    pub fn resolve(&self) -> Result<EditorCommand> {
        let Some(cmd) = self.cmd() else {
            return Err(BurrowError::EditorUnavailable(
                "No editor configured. Set with: export EDITOR=nano".to_string(),
            ));
        };

        let mut parts = cmd.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(BurrowError::EditorUnavailable(
                "No editor configured. Set with: export EDITOR=nano".to_string(),
            ));
        };

        let program = which::which(name)
            .map_err(|_| BurrowError::EditorUnavailable(format!("Editor '{name}' not found")))?;

        Ok(EditorCommand {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }
}

/// The operator's preferred shell for directory handoff.
#[derive(Debug, Clone)]
pub struct Shell {
    program: String,
}

impl Shell {
    #[cfg(unix)]
    const FALLBACK: &'static str = "/bin/sh";
    #[cfg(not(unix))]
    const FALLBACK: &'static str = "cmd.exe";

    pub fn new(program: Option<String>) -> Self {
        let program = program
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| Self::FALLBACK.to_string());
        Shell { program }
    }

    pub fn from_env() -> Self {
        #[cfg(unix)]
        let var = std::env::var("SHELL").ok();
        #[cfg(not(unix))]
        let var = std::env::var("COMSPEC").ok();
        Self::new(var)
    }

    #[inline]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_missing_is_reported() {
        let err = Editor::new(None).resolve().err();
        assert!(matches!(err, Some(BurrowError::EditorUnavailable(ref msg)) if msg.contains("EDITOR")));

        let blank = Editor::new(Some("   ".into()));
        assert_eq!(blank.cmd(), None, "blank editor counts as unset");
    }

    #[test]
    fn editor_not_on_path_is_reported() {
        let editor = Editor::new(Some("burrow-no-such-editor-xyz --wait".into()));
        let err = editor.resolve().err();
        assert!(
            matches!(err, Some(BurrowError::EditorUnavailable(ref msg)) if msg.contains("burrow-no-such-editor-xyz"))
        );
    }

    #[test]
    fn shell_falls_back_when_unset() {
        assert_eq!(Shell::new(None).program(), Shell::FALLBACK);
        assert_eq!(Shell::new(Some(" ".into())).program(), Shell::FALLBACK);
        assert_eq!(Shell::new(Some("/usr/bin/zsh".into())).program(), "/usr/bin/zsh");
    }

    #[test]
    fn default_keys_cover_every_action() {
        let keys = Keys::default();
        let lists = [
            keys.open_file(),
            keys.go_up(),
            keys.go_down(),
            keys.go_parent(),
            keys.go_into_dir(),
            keys.go_to_top(),
            keys.go_to_bottom(),
            keys.page_up(),
            keys.page_down(),
            keys.search(),
            keys.create(),
            keys.create_directory(),
            keys.rename(),
            keys.delete(),
            keys.keybind_help(),
            keys.quit(),
        ];
        assert!(lists.iter().all(|l| !l.is_empty()));
    }
}
