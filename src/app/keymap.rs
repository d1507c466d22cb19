//! Key mapping and action dispatch for burrow.
//!
//! Maps key events to actions. Bindings come from the key-spec strings in
//! [Keys](crate::config::Keys), e.g. `"j"`, `"Ctrl+n"`, `"<c-d>"` or `"PageDown"`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in Normal mode: navigation, file, or system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    Nav(NavAction),
    File(FileAction),
    System(SystemAction),
}

/// Navigation actions (move, into dir, parent, etc.)
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NavAction {
    GoParent,
    GoIntoDir,
    GoUp,
    GoDown,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
}

/// File actions (open, create, rename, delete, search)
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FileAction {
    Open,
    Create,
    CreateDirectory,
    Rename,
    Delete,
    Search,
}

/// System actions (quit, help)
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SystemAction {
    Quit,
    KeyBindHelp,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built from the config
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use FileAction as F;
        use SystemAction as S;

        // NavActions
        bind!(keys.go_parent(),         Action::Nav(N::GoParent));
        bind!(keys.go_into_dir(),       Action::Nav(N::GoIntoDir));
        bind!(keys.go_up(),             Action::Nav(N::GoUp));
        bind!(keys.go_down(),           Action::Nav(N::GoDown));
        bind!(keys.go_to_top(),         Action::Nav(N::GoToTop));
        bind!(keys.go_to_bottom(),      Action::Nav(N::GoToBottom));
        bind!(keys.page_up(),           Action::Nav(N::PageUp));
        bind!(keys.page_down(),         Action::Nav(N::PageDown));

        // FileActions
        bind!(keys.open_file(),         Action::File(F::Open));
        bind!(keys.create(),            Action::File(F::Create));
        bind!(keys.create_directory(),  Action::File(F::CreateDirectory));
        bind!(keys.rename(),            Action::File(F::Rename));
        bind!(keys.delete(),            Action::File(F::Delete));
        bind!(keys.search(),            Action::File(F::Search));

        // SystemActions
        bind!(keys.keybind_help(),      Action::System(S::KeyBindHelp));
        bind!(keys.quit(),              Action::System(S::Quit));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // Terminals report shifted symbols like '?' with SHIFT set
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // A lone symbol is always a literal key, even '+' or '-'
    if input.chars().count() == 1 {
        let c = input.chars().next()?;
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => code = Some(KeyCode::PageDown),
            "delete" | "del" => code = Some(KeyCode::Delete),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(spec = %k, "ignoring unparsable key binding"),
        }
    }
}
