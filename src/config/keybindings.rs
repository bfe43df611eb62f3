use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub suspend: KeyBinding,
    pub present: KeyBinding,
}

/// Keys understood by a presented alert.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub next: KeyBinding,
    pub previous: KeyBinding,
    pub activate: KeyBinding,
    pub dismiss: KeyBinding,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub dialog: DialogKeybindings,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            suspend: Key::with_ctrl(KeyCode::Char('z')).into(),
            present: Key::new(KeyCode::Char('p')).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            next: vec![
                Key::new(KeyCode::Tab),
                Key::new(KeyCode::Right),
                Key::new(KeyCode::Down),
                Key::new(KeyCode::Char('l')),
                Key::new(KeyCode::Char('j')),
            ]
            .into(),
            previous: vec![
                Key::new(KeyCode::BackTab),
                Key::new(KeyCode::Left),
                Key::new(KeyCode::Up),
                Key::new(KeyCode::Char('h')),
                Key::new(KeyCode::Char('k')),
            ]
            .into(),
            activate: vec![Key::new(KeyCode::Enter), Key::new(KeyCode::Char(' '))].into(),
            dismiss: Key::new(KeyCode::Esc).into(),
        }
    }
}
