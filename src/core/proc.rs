//! External processes for burrow: the editor and the shell handoff.
//!
//! Both run only after the terminal has been restored. The editor is a child
//! process; the shell replaces burrow entirely on unix so that it inherits the
//! chosen directory as its working directory.

use crate::config::{EditorCommand, Shell};
use crate::error::{BurrowError, Result};

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Checks that `target` still exists and is a directory the process can enter.
pub fn validate_target(target: &Path) -> Result<()> {
    match fs::metadata(target) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(BurrowError::Validation(format!(
            "Target is not a directory: {}",
            target.display()
        ))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BurrowError::Validation(format!(
            "Target directory does not exist: {}",
            target.display()
        ))),
        Err(e) => Err(BurrowError::from_io(target, e)),
    }
}

/// Runs the editor on `file` and waits for it to exit.
pub fn open_in_editor(editor: &EditorCommand, file: &Path) -> io::Result<ExitStatus> {
    tracing::info!(editor = %editor.program.display(), file = %file.display(), "opening editor");
    Command::new(&editor.program)
        .args(&editor.args)
        .arg(file)
        .status()
}

/// Hands the terminal to `shell`, started in `target`.
///
/// On unix the current process image is replaced, so this only returns when that
/// fails. Elsewhere the shell runs as a child and burrow exits with its status.
pub fn hand_off(target: &Path, shell: &Shell) -> BurrowError {
    if let Err(e) = validate_target(target) {
        return e;
    }
    tracing::info!(shell = shell.program(), dir = %target.display(), "handing off to shell");

    let err = exec_shell(target, shell.program());
    BurrowError::Handoff {
        shell: shell.program().to_string(),
        source: err,
    }
}

/// Whether a failed [hand_off] should end burrow with a failure status.
///
/// A target that vanished before the handoff only degrades to a plain exit.
pub fn handoff_is_fatal(err: &BurrowError) -> bool {
    !matches!(err, BurrowError::Validation(_))
}

#[cfg(unix)]
fn exec_shell(target: &Path, program: &str) -> io::Error {
    use std::os::unix::process::CommandExt;
    Command::new(program).current_dir(target).exec()
}

#[cfg(not(unix))]
fn exec_shell(target: &Path, program: &str) -> io::Error {
    match Command::new(program).current_dir(target).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(0)),
        Err(e) => e,
    }
}
