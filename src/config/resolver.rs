use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{DialogAction, GlobalAction};
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to actions using the configured keybindings.
#[derive(Debug, Clone, Default)]
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    #[must_use]
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    #[must_use]
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.matches(event),
            GlobalAction::Suspend => kb.suspend.matches(event),
            GlobalAction::Present => kb.present.matches(event),
        }
    }

    #[must_use]
    pub fn display_global(&self, action: GlobalAction) -> String {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => kb.quit.display(),
            GlobalAction::Suspend => kb.suspend.display(),
            GlobalAction::Present => kb.present.display(),
        }
    }

    #[must_use]
    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Next => kb.next.matches(event),
            DialogAction::Previous => kb.previous.matches(event),
            DialogAction::Activate => kb.activate.matches(event),
            DialogAction::Dismiss => kb.dismiss.matches(event),
        }
    }

    #[must_use]
    pub fn display_dialog(&self, action: DialogAction) -> String {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Next => kb.next.display(),
            DialogAction::Previous => kb.previous.display(),
            DialogAction::Activate => kb.activate.display(),
            DialogAction::Dismiss => kb.dismiss.display(),
        }
    }
}
