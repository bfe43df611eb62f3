pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::{config_path, load, load_from};
pub use resolver::KeyResolver;
use serde::Deserialize;

use crate::animation::AnimationKind;
use crate::theme::{self, Theme, ThemeOverrides};

/// `[theme]`: a named preset plus optional per-field overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: String,
    #[serde(flatten)]
    pub overrides: ThemeOverrides,
}

impl ThemeConfig {
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.overrides.apply(theme::theme_from_name(&self.name))
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            overrides: ThemeOverrides::default(),
        }
    }
}

/// `[alert]`: defaults for alerts built by the application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub animation: AnimationKind,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub alert: AlertConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}
