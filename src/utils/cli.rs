//! Command-line argument parsing for burrow.
//!
//! When invoked with no arguments burrow opens the current directory. Unknown flags
//! are usage errors and terminate with a non-zero status before the UI starts.

use clap::Parser;
use std::path::PathBuf;

const KEYBINDS: &str = "\
KEYBINDINGS:
  j / k, Down / Up      Move selection
  PageDown / PageUp     Move one page
  Home / End            First / last entry
  l, Right              Enter directory
  h, Left, Backspace    Go to parent directory
  Enter, Ctrl+o         Enter directory or open file in $EDITOR
  /                     Fuzzy search (Esc clears)
  Ctrl+n / Ctrl+f       New file / new folder
  Ctrl+r                Rename
  Ctrl+d                Delete (asks y/N)
  ?                     Key help
  q, Ctrl+c             Quit (hand off to the current directory with --autocd)

ENVIRONMENT:
  EDITOR, VISUAL        Editor used to open files
  SHELL                 Shell started by --autocd
  BURROW_AUTOCD=1       Same as --autocd
  BURROW_LOG            Log filter (e.g. debug); enables the log file
  BURROW_LOG_FILE       Log file location";

/// A keyboard-driven terminal file browser.
#[derive(Parser, Debug, Default)]
#[command(name = "burrow", version, about, long_about = None, after_help = KEYBINDS)]
pub struct Cli {
    /// Directory to open (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// On quit, replace burrow with your shell positioned in the last visited directory
    #[arg(short = 'a', long = "autocd")]
    pub autocd: bool,
}
