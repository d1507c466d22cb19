//! Runtime configuration assembly for burrow.
//!
//! burrow reads no configuration file. [Config] is built once at startup from the
//! command line and the environment, then borrowed by the application state.

use crate::config::{Editor, Keys, Shell};
use crate::utils::cli::Cli;

/// Environment variable that enables directory inheritance when set to `1`.
pub const AUTOCD_ENV: &str = "BURROW_AUTOCD";

/// Main configuration struct for burrow.
#[derive(Debug, Clone, Default)]
pub struct Config {
    inherit_dir: bool,
    editor: Editor,
    shell: Shell,
    keys: Keys,
}

impl Config {
    pub fn new(inherit_dir: bool, editor: Editor, shell: Shell) -> Self {
        Self {
            inherit_dir,
            editor,
            shell,
            keys: Keys::default(),
        }
    }

    /// Builds the configuration from parsed arguments and the process environment.
    pub fn from_cli(cli: &Cli) -> Self {
        let env_flag = std::env::var(AUTOCD_ENV).ok();
        Self::new(
            autocd_enabled(cli.autocd, env_flag.as_deref()),
            Editor::from_env(),
            Shell::from_env(),
        )
    }

    // Getters

    /// Whether quitting hands the shell off to the final directory.
    #[inline]
    pub fn inherit_dir(&self) -> bool {
        self.inherit_dir
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }
}

/// The flag wins; otherwise the environment must hold exactly `1`.
pub(crate) fn autocd_enabled(flag: bool, env_value: Option<&str>) -> bool {
    flag || env_value.map(str::trim) == Some("1")
}
