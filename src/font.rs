//! Font descriptors for alert text.

use ratatui::style::Modifier;

/// Semantic text style of a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    LargeTitle,
    Title1,
    Title2,
    Title3,
    Headline,
    Subheadline,
    #[default]
    Body,
    Callout,
    Footnote,
    Caption1,
    Caption2,
}

/// Font weight, ordered from lightest to heaviest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Weight {
    UltraLight,
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

/// Font name, style and weight.
///
/// Terminals render a single monospace face, so the name is carried as data
/// only. The weight selects terminal modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub name: String,
    pub style: TextStyle,
    pub weight: Weight,
}

impl Font {
    pub fn new(name: impl Into<String>, style: TextStyle, weight: Weight) -> Self {
        Self {
            name: name.into(),
            style,
            weight,
        }
    }

    /// Terminal modifiers approximating this font.
    #[must_use]
    pub fn modifiers(&self) -> Modifier {
        let mut modifiers = Modifier::empty();
        if self.weight >= Weight::Semibold {
            modifiers |= Modifier::BOLD;
        }
        if self.style == TextStyle::LargeTitle {
            modifiers |= Modifier::BOLD;
        }
        modifiers
    }
}
