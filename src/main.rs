//! main.rs
//! Entry point for burrow

use burrow_tui::app::{AppState, ExitAction};
use burrow_tui::config::Config;
use burrow_tui::core::proc::{hand_off, handoff_is_fatal, open_in_editor, validate_target};
use burrow_tui::core::terminal;
use burrow_tui::logging::Logger;
use burrow_tui::utils::cli::Cli;
use burrow_tui::utils::resolve_start_dir;

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        let _ = terminal::restore_terminal();

        tracing::error!(%info, "panic");
        eprintln!("\n[burrow] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let cli = Cli::parse();
    Logger::init();
    let config = Config::from_cli(&cli);

    let start = match resolve_start_dir(cli.path.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            let shown = cli
                .path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string());
            eprintln!("[burrow] Error: Path '{}' cannot be opened: {}", shown, e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = match AppState::from_dir(&config, &start) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("[burrow] Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let action = match terminal::run_terminal(&mut app) {
        Ok(action) => action,
        Err(e) => {
            tracing::error!(error = %e, "terminal failure");
            eprintln!("[burrow] Terminal error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(notice) = app.take_exit_notice() {
        eprintln!("[burrow] {}", notice);
    }
    finish(action, &config)
}

/// Carries out the exit action once the terminal is back in its normal state.
fn finish(action: ExitAction, config: &Config) -> ExitCode {
    match action {
        ExitAction::Quit => ExitCode::SUCCESS,
        ExitAction::InheritDirectory(dir) => inherit(&dir, config),
        ExitAction::OpenEditor {
            command,
            file,
            then_inherit,
        } => {
            let editor_ok = match open_in_editor(&command, &file) {
                Ok(status) => {
                    if !status.success() {
                        tracing::warn!(%status, "editor exited unsuccessfully");
                    }
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "editor failed to start");
                    eprintln!("[burrow] Error opening editor: {}", e);
                    false
                }
            };

            match then_inherit {
                // The directory may have gone away while the editor was open.
                Some(dir) => match validate_target(&dir) {
                    Ok(()) => inherit(&dir, config),
                    Err(e) => {
                        eprintln!("[burrow] {}", e);
                        ExitCode::SUCCESS
                    }
                },
                None if editor_ok => ExitCode::SUCCESS,
                None => ExitCode::FAILURE,
            }
        }
    }
}

/// Replaces burrow with the shell. Only returns if the handoff did not happen.
fn inherit(dir: &Path, config: &Config) -> ExitCode {
    eprintln!("[burrow] Inheriting directory: {}", dir.display());
    let err = hand_off(dir, config.shell());

    if !handoff_is_fatal(&err) {
        tracing::warn!(error = %err, "handoff skipped");
        eprintln!("[burrow] {}", err);
        return ExitCode::SUCCESS;
    }
    tracing::error!(error = %err, "handoff failed");
    eprintln!("[burrow] Error: {}", err);
    ExitCode::FAILURE
}
