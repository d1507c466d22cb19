//! Session tests for burrow
//!
//! Drive [AppState] with key events the way the event loop does and check the
//! filesystem and navigator afterwards. Every test works inside its own temporary
//! directory.

use burrow_tui::app::{AppState, ExitAction, KeypressResult, ModeState};
use burrow_tui::config::{Config, Editor, Shell};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::seq::SliceRandom;
use rand::{Rng, rng};
use std::error;
use std::fs::{self, File};
use tempfile::tempdir;

fn key(app: &mut AppState, code: KeyCode) -> KeypressResult {
    app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(app: &mut AppState, c: char) -> KeypressResult {
    app.handle_keypress(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

fn selected_name(app: &AppState) -> Option<String> {
    app.nav().selected_entry().map(|e| e.name_str().into_owned())
}

#[test]
fn test_browse_create_rename_delete_cycle() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, dir.path())?;

    // new folder, then step into it
    ctrl(&mut app, 'f');
    type_text(&mut app, "work space");
    key(&mut app, KeyCode::Enter);
    assert!(dir.path().join("work-space").is_dir());
    assert_eq!(selected_name(&app), Some("work-space".into()));

    key(&mut app, KeyCode::Char('l'));
    assert_eq!(app.nav().current_dir(), dir.path().join("work-space"));

    // two files with the same requested name
    for _ in 0..2 {
        ctrl(&mut app, 'n');
        type_text(&mut app, "plan.txt");
        key(&mut app, KeyCode::Enter);
    }
    assert!(dir.path().join("work-space/plan.txt").is_file());
    assert!(dir.path().join("work-space/plan-1.txt").is_file());
    assert_eq!(selected_name(&app), Some("plan-1.txt".into()));
    assert_eq!(app.status_line().0, "Created file: plan-1.txt (auto-renamed)");

    // rename the selected file by editing the prefilled name
    ctrl(&mut app, 'r');
    key(&mut app, KeyCode::Home);
    type_text(&mut app, "old-");
    key(&mut app, KeyCode::Enter);
    assert!(dir.path().join("work-space/old-plan-1.txt").is_file());
    assert_eq!(selected_name(&app), Some("old-plan-1.txt".into()));

    // delete it and go back up
    ctrl(&mut app, 'd');
    key(&mut app, KeyCode::Char('y'));
    assert!(!dir.path().join("work-space/old-plan-1.txt").exists());
    assert_eq!(app.nav().entries().len(), 1);

    key(&mut app, KeyCode::Char('h'));
    assert_eq!(app.nav().current_dir(), dir.path());
    assert_eq!(selected_name(&app), Some("work-space".into()));
    Ok(())
}

#[test]
fn test_random_listing_is_sorted_and_bounded() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let mut rng = rng();

    let mut names: Vec<String> = (0..40).map(|i| format!("entry_{i:03}")).collect();
    names.shuffle(&mut rng);
    let dir_count = rng.random_range(1..10);
    for (i, name) in names.iter().enumerate() {
        if i < dir_count {
            fs::create_dir(dir.path().join(name))?;
        } else {
            File::create(dir.path().join(name))?;
        }
    }

    let config = Config::default();
    let mut app = AppState::from_dir(&config, dir.path())?;
    let entries = app.nav().entries();
    assert_eq!(entries.len(), 40);
    assert!(entries[..dir_count].iter().all(|e| e.is_dir()));
    assert!(entries[dir_count..].iter().all(|e| !e.is_dir()));

    for _ in 0..rng.random_range(50..100) {
        key(&mut app, KeyCode::Char('j'));
    }
    assert_eq!(app.nav().selected_idx(), 39);

    for _ in 0..5 {
        key(&mut app, KeyCode::PageUp);
    }
    key(&mut app, KeyCode::Up);
    assert_eq!(app.nav().selected_idx(), 0);
    Ok(())
}

#[test]
fn test_search_is_case_insensitive() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    for name in ["README.md", "Cargo.toml", "src.rs"] {
        File::create(dir.path().join(name))?;
    }
    let config = Config::default();
    let mut app = AppState::from_dir(&config, dir.path())?;

    key(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "readme");
    assert_eq!(app.nav().shown_len(), 1);
    assert_eq!(selected_name(&app), Some("README.md".into()));

    key(&mut app, KeyCode::Backspace);
    assert_eq!(app.nav().query(), "readm");

    key(&mut app, KeyCode::Esc);
    assert_eq!(app.mode(), &ModeState::Normal);
    assert_eq!(app.nav().shown_len(), 3);
    Ok(())
}

#[test]
fn test_inherit_after_navigation() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("a").join("b"))?;
    let config = Config::new(true, Editor::default(), Shell::default());
    let mut app = AppState::from_dir(&config, dir.path())?;

    key(&mut app, KeyCode::Enter);
    key(&mut app, KeyCode::Right);
    assert_eq!(
        ctrl(&mut app, 'c'),
        KeypressResult::Exit(ExitAction::InheritDirectory(dir.path().join("a").join("b")))
    );
    Ok(())
}

#[test]
fn test_status_message_expires() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, dir.path())?;

    ctrl(&mut app, 'n');
    key(&mut app, KeyCode::Enter);
    let (text, is_error) = app.status_line();
    assert_eq!(text, "File name cannot be empty");
    assert!(is_error);

    let deadline = app.status_deadline().ok_or("no status deadline")?;
    assert!(deadline > std::time::Instant::now());
    assert!(!app.tick(), "fresh message must survive a tick");
    Ok(())
}
