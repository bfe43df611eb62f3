use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::Deserialize;

use crate::color;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Visual palette of one alert.
///
/// Themes are plain values: they are copied into an alert when it is built
/// and never change afterwards. Numeric fields are not validated; whatever is
/// stored is handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub window_color: Color,
    pub text_color: Color,
    /// Corner radius in points. Any positive radius renders rounded borders.
    pub corner_radius: f32,
    pub opacity: f64,
    /// Background of stacked buttons. `Color::Reset` is transparent.
    pub button_color: Color,
    pub button_text_color: Color,
}

impl Theme {
    /// White window, black text, radius 25, fully opaque, transparent buttons
    /// with black text.
    pub const DEFAULT: Self = Self {
        window_color: Color::White,
        text_color: Color::Black,
        corner_radius: 25.0,
        opacity: 1.0,
        button_color: Color::Reset,
        button_text_color: Color::Black,
    };

    /// Default theme with the given fields replaced.
    #[must_use]
    pub const fn custom(overrides: ThemeOverrides) -> Self {
        overrides.apply(Self::DEFAULT)
    }

    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            window_color: catppuccin_to_color(&c.base),
            text_color: catppuccin_to_color(&c.text),
            corner_radius: Self::DEFAULT.corner_radius,
            opacity: Self::DEFAULT.opacity,
            button_color: catppuccin_to_color(&c.surface0),
            button_text_color: catppuccin_to_color(&c.lavender),
        }
    }

    /// Catppuccin Mocha theme (dark).
    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    /// Catppuccin Latte theme (light).
    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    #[must_use]
    pub const fn with_window_color(mut self, color: Color) -> Self {
        self.window_color = color;
        self
    }

    #[must_use]
    pub const fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    #[must_use]
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub const fn with_button_color(mut self, color: Color) -> Self {
        self.button_color = color;
        self
    }

    #[must_use]
    pub const fn with_button_text_color(mut self, color: Color) -> Self {
        self.button_text_color = color;
        self
    }

    /// Border drawn around the alert window.
    #[must_use]
    pub fn border_type(&self) -> BorderType {
        if self.corner_radius > 0.0 {
            BorderType::Rounded
        } else {
            BorderType::Plain
        }
    }

    /// Window background after applying the theme opacity over `backdrop`.
    #[must_use]
    pub fn window_fill(&self, backdrop: Color) -> Color {
        color::blend(self.window_color, backdrop, self.opacity)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Optional replacements for each theme field.
///
/// Deserializes from the `[theme]` table of the config file, for example
/// `window_color = "#1e1e2e"` or `opacity = 0.9`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub window_color: Option<Color>,
    pub text_color: Option<Color>,
    pub corner_radius: Option<f32>,
    pub opacity: Option<f64>,
    pub button_color: Option<Color>,
    pub button_text_color: Option<Color>,
}

impl ThemeOverrides {
    /// Replace the fields of `base` that are set in `self`.
    #[must_use]
    pub const fn apply(self, base: Theme) -> Theme {
        Theme {
            window_color: match self.window_color {
                Some(color) => color,
                None => base.window_color,
            },
            text_color: match self.text_color {
                Some(color) => color,
                None => base.text_color,
            },
            corner_radius: match self.corner_radius {
                Some(radius) => radius,
                None => base.corner_radius,
            },
            opacity: match self.opacity {
                Some(opacity) => opacity,
                None => base.opacity,
            },
            button_color: match self.button_color {
                Some(color) => color,
                None => base.button_color,
            },
            button_text_color: match self.button_text_color {
                Some(color) => color,
                None => base.button_text_color,
            },
        }
    }
}

/// A named built-in theme.
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    pub name: &'static str,
    pub theme: Theme,
}

impl ThemeInfo {
    const fn new(name: &'static str, theme: Theme) -> Self {
        Self { name, theme }
    }
}

impl std::fmt::Display for ThemeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Returns a list of all available built-in themes.
#[must_use]
pub fn available_themes() -> Vec<ThemeInfo> {
    vec![
        ThemeInfo::new("Default", Theme::DEFAULT),
        ThemeInfo::new("Catppuccin Mocha", Theme::catppuccin_mocha()),
        ThemeInfo::new("Catppuccin Latte", Theme::catppuccin_latte()),
    ]
}

/// Look up a theme by name. Returns the default theme if not found.
#[must_use]
pub fn theme_from_name(name: &str) -> Theme {
    available_themes()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .map(|t| t.theme)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let theme = Theme::default();
        assert_eq!(theme.window_color, Color::White);
        assert_eq!(theme.text_color, Color::Black);
        assert!((theme.corner_radius - 25.0).abs() < f32::EPSILON);
        assert!((theme.opacity - 1.0).abs() < f64::EPSILON);
        assert_eq!(theme.button_color, Color::Reset);
        assert_eq!(theme.button_text_color, Color::Black);
    }

    #[test]
    fn test_custom_without_overrides_is_default() {
        assert_eq!(Theme::custom(ThemeOverrides::default()), Theme::default());
    }

    #[test]
    fn test_custom_replaces_only_set_fields() {
        let theme = Theme::custom(ThemeOverrides {
            window_color: Some(Color::Blue),
            opacity: Some(0.5),
            ..ThemeOverrides::default()
        });

        assert_eq!(theme.window_color, Color::Blue);
        assert!((theme.opacity - 0.5).abs() < f64::EPSILON);
        assert_eq!(theme.text_color, Theme::DEFAULT.text_color);
        assert!((theme.corner_radius - Theme::DEFAULT.corner_radius).abs() < f32::EPSILON);
        assert_eq!(theme.button_color, Theme::DEFAULT.button_color);
        assert_eq!(theme.button_text_color, Theme::DEFAULT.button_text_color);
    }

    #[test]
    fn test_every_field_can_be_overridden() {
        let theme = Theme::custom(ThemeOverrides {
            window_color: Some(Color::Black),
            text_color: Some(Color::White),
            corner_radius: Some(0.0),
            opacity: Some(0.8),
            button_color: Some(Color::Red),
            button_text_color: Some(Color::Yellow),
        });

        let expected = Theme::default()
            .with_window_color(Color::Black)
            .with_text_color(Color::White)
            .with_corner_radius(0.0)
            .with_opacity(0.8)
            .with_button_color(Color::Red)
            .with_button_text_color(Color::Yellow);
        assert_eq!(theme, expected);
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let theme = Theme::custom(ThemeOverrides {
            corner_radius: Some(-4.0),
            opacity: Some(7.5),
            ..ThemeOverrides::default()
        });
        assert!((theme.corner_radius + 4.0).abs() < f32::EPSILON);
        assert!((theme.opacity - 7.5).abs() < f64::EPSILON);
        assert_eq!(theme.border_type(), BorderType::Plain);
    }

    #[test]
    fn test_window_fill_uses_opacity() {
        let opaque = Theme::default();
        assert_eq!(opaque.window_fill(Color::Black), Color::White);

        let translucent = Theme::default().with_opacity(0.5);
        assert_eq!(translucent.window_fill(Color::Black), Color::Rgb(128, 128, 128));
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(theme_from_name("Catppuccin Mocha"), Theme::catppuccin_mocha());
        assert_eq!(theme_from_name("catppuccin latte"), Theme::catppuccin_latte());
        assert_eq!(theme_from_name("does not exist"), Theme::default());
    }
}
