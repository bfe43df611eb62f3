use std::fmt;
use std::str::FromStr;

use color_eyre::eyre::{Report, eyre};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer};

/// A single key with modifiers, written as `"ctrl+c"`, `"Enter"` or `"q"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    #[must_use]
    pub const fn with_shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    /// Whether `event` is this key.
    ///
    /// Shift is ignored for characters since terminals report it
    /// inconsistently; the character itself carries the case.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                a == b
                    && (self.modifiers - KeyModifiers::SHIFT) == (event.modifiers - KeyModifiers::SHIFT)
            }
            // crossterm reports shift+tab as BackTab, with or without SHIFT
            (KeyCode::BackTab, KeyCode::BackTab) => {
                (self.modifiers - KeyModifiers::SHIFT) == (event.modifiers - KeyModifiers::SHIFT)
            }
            _ => self.code == event.code && self.modifiers == event.modifiers,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Esc => write!(f, "Esc"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::BackTab => write!(f, "BackTab"),
            KeyCode::Up => write!(f, "Up"),
            KeyCode::Down => write!(f, "Down"),
            KeyCode::Left => write!(f, "Left"),
            KeyCode::Right => write!(f, "Right"),
            KeyCode::F(n) => write!(f, "F{n}"),
            _ => write!(f, "?"),
        }
    }
}

impl FromStr for Key {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (prefix, key_part) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            s.rsplit_once('+').unwrap_or(("", s))
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in prefix.split('+').filter(|part| !part.is_empty()) {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => return Err(eyre!("Unknown modifier: {other}")),
            };
        }

        let code = match key_part.to_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            lower if lower.len() > 1 && lower.starts_with('f') => {
                let n = lower[1..]
                    .parse()
                    .map_err(|_| eyre!("Invalid function key: {key_part}"))?;
                KeyCode::F(n)
            }
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(eyre!("Unknown key: {key_part}")),
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One or more keys bound to the same action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    Single(Key),
    Multiple(Vec<Key>),
}

impl KeyBinding {
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        match self {
            Self::Single(key) => key.matches(event),
            Self::Multiple(keys) => keys.iter().any(|k| k.matches(event)),
        }
    }

    /// Keys joined with `/`, for help text.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Single(key) => key.to_string(),
            Self::Multiple(keys) => keys
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("/"),
        }
    }
}

impl From<Key> for KeyBinding {
    fn from(key: Key) -> Self {
        Self::Single(key)
    }
}

impl From<Vec<Key>> for KeyBinding {
    fn from(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!("q".parse::<Key>().unwrap(), Key::new(KeyCode::Char('q')));
        assert_eq!("Enter".parse::<Key>().unwrap(), Key::new(KeyCode::Enter));
        assert_eq!("esc".parse::<Key>().unwrap(), Key::new(KeyCode::Esc));
        assert_eq!("ctrl+c".parse::<Key>().unwrap(), Key::with_ctrl(KeyCode::Char('c')));
        assert_eq!("F1".parse::<Key>().unwrap(), Key::new(KeyCode::F(1)));
        assert_eq!("Space".parse::<Key>().unwrap(), Key::new(KeyCode::Char(' ')));
        assert_eq!("+".parse::<Key>().unwrap(), Key::new(KeyCode::Char('+')));
        assert_eq!("ctrl++".parse::<Key>().unwrap(), Key::with_ctrl(KeyCode::Char('+')));
    }

    #[test]
    fn test_key_parsing_errors() {
        assert!("hyper+q".parse::<Key>().is_err());
        assert!("nope".parse::<Key>().is_err());
        assert!("fx".parse::<Key>().is_err());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new(KeyCode::Char('q')).to_string(), "q");
        assert_eq!(Key::new(KeyCode::Enter).to_string(), "Enter");
        assert_eq!(Key::with_ctrl(KeyCode::Char('z')).to_string(), "ctrl+z");
    }

    #[test]
    fn test_key_matches() {
        let key = Key::new(KeyCode::Char('q'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_uppercase_and_backtab() {
        let key = Key::new(KeyCode::Char('G'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)));

        let back = Key::new(KeyCode::BackTab);
        assert!(back.matches(&KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_binding_display() {
        let binding = KeyBinding::from(vec![Key::new(KeyCode::Enter), Key::new(KeyCode::Char(' '))]);
        assert_eq!(binding.display(), "Enter/Space");
    }
}
