//! Terminal rendering and event loop for burrow.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and events (keypress, resize) to app logic.

use crate::app::{AppState, ExitAction, KeypressResult};
use crate::ui;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;
use std::time::Instant;

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until the session ends and returns how it ended. The terminal is restored
/// before returning, also when the loop fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<ExitAction> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, app);

    restore_terminal()?;
    result
}

/// Leaves raw mode and the alternate screen and shows the cursor again.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)
}

/// Main event loop of burrow: draws UI, waits for events and dispatches them to the app.
///
/// Without a status message the loop blocks on input. While one is showing, the wait
/// is bounded by its expiry so the status line reverts on time.
fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<ExitAction>
where
    io::Error: From<<B as Backend>::Error>,
{
    let mut dirty = true;
    loop {
        dirty |= app.tick();

        if dirty {
            terminal.draw(|f| ui::render(f, app))?;
            dirty = false;
        }

        let ready = match app.status_deadline() {
            Some(deadline) => event::poll(deadline.saturating_duration_since(Instant::now()))?,
            None => true,
        };
        if !ready {
            continue;
        }

        match event::read()? {
            // handle keypress
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let KeypressResult::Exit(action) = app.handle_keypress(key) {
                    tracing::debug!(?action, "session finished");
                    return Ok(action);
                }
                dirty = true;
            }

            // handle resize
            Event::Resize(width, height) => {
                app.handle_resize(width, height);
                dirty = true;
            }

            _ => {}
        }
    }
}
