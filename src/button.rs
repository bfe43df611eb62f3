//! Alert buttons.

use std::fmt;
use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::color;
use crate::font::{Font, TextStyle, Weight};
use crate::units;

/// Callback run when a button is activated.
pub type Action = Rc<dyn Fn()>;

pub const DEFAULT_LABEL: &str = "Ok";
pub const DEFAULT_SIZE: f32 = 50.0;
pub const DEFAULT_FONT_NAME: &str = "Helvetica Neue";
/// Padding around the label frame, in points.
pub const LABEL_PADDING: f32 = 10.0;

/// Shadow strength of the raised surface.
const RAISED_SHADOW_ALPHA: f64 = 0.35;

/// Closes the alert a button belongs to.
///
/// Every button runs the dismiss action after its own action. The presenter
/// hands one out per activation.
#[derive(Clone)]
pub struct DismissAction {
    dismiss: Rc<dyn Fn()>,
}

impl DismissAction {
    pub fn new(dismiss: impl Fn() + 'static) -> Self {
        Self {
            dismiss: Rc::new(dismiss),
        }
    }

    pub fn call(&self) {
        (self.dismiss)();
    }
}

impl fmt::Debug for DismissAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissAction").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonKind {
    #[default]
    Default,
}

/// Colors a button is drawn with, chosen by the alert's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPalette {
    /// Background fill. `Color::Reset` leaves the window showing through.
    pub fill: Color,
    pub text: Color,
}

/// One tappable action in an alert.
#[derive(Clone)]
pub struct Button {
    label: String,
    width: f32,
    height: f32,
    raised: bool,
    font: Font,
    color: Color,
    kind: ButtonKind,
    action: Option<Action>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            raised: false,
            font: Font::new(DEFAULT_FONT_NAME, TextStyle::Body, Weight::Light),
            color: Color::White,
            kind: ButtonKind::Default,
            action: None,
        }
    }

    #[must_use]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub const fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Draw the label on a raised surface filled with the button color.
    #[must_use]
    pub const fn raised(mut self, raised: bool) -> Self {
        self.raised = raised;
        self
    }

    #[must_use]
    pub fn with_font_name(mut self, name: impl Into<String>) -> Self {
        self.font.name = name.into();
        self
    }

    #[must_use]
    pub const fn with_style(mut self, style: TextStyle) -> Self {
        self.font.style = style;
        self
    }

    #[must_use]
    pub const fn with_weight(mut self, weight: Weight) -> Self {
        self.font.weight = weight;
        self
    }

    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Rc::new(action));
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub const fn is_raised(&self) -> bool {
        self.raised
    }

    #[must_use]
    pub const fn font(&self) -> &Font {
        &self.font
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn kind(&self) -> ButtonKind {
        self.kind
    }

    #[must_use]
    pub const fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Run the button's action, if any, then the dismiss action.
    pub fn activate(&self, dismiss: &DismissAction) {
        if let Some(action) = &self.action {
            action();
        }
        dismiss.call();
    }

    /// Outer size in cells, label frame plus padding.
    #[must_use]
    pub fn size_in_cells(&self) -> (u16, u16) {
        (
            units::cols(self.width + 2.0 * LABEL_PADDING),
            units::rows(self.height + 2.0 * LABEL_PADDING),
        )
    }

    /// The label frame centered inside `area`.
    fn label_frame(&self, area: Rect) -> Rect {
        let width = units::cols(self.width).min(area.width);
        let height = units::rows(self.height).min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, palette: ButtonPalette, focused: bool) {
        if area.is_empty() {
            return;
        }
        if palette.fill != Color::Reset {
            Block::default()
                .style(Style::default().bg(palette.fill))
                .render(area, buf);
        }

        let frame = self.label_frame(area);
        if self.raised {
            RaisedSurface { color: self.color }.render(frame, buf);
        }

        let mut style = Style::default()
            .fg(palette.text)
            .add_modifier(self.font.modifiers());
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }

        // single line, vertically centered in the frame
        let line_area = Rect::new(frame.x, frame.y + frame.height / 2, frame.width, frame.height.min(1));
        Paragraph::new(self.label.as_str())
            .style(style)
            .alignment(Alignment::Center)
            .render(line_area, buf);
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("raised", &self.raised)
            .field("font", &self.font)
            .field("color", &self.color)
            .field("kind", &self.kind)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Embossed backdrop: a rounded surface with a darker rim.
struct RaisedSurface {
    color: Color,
}

impl Widget for RaisedSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let shadow = color::blend(Color::Black, self.color, RAISED_SHADOW_ALPHA);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(shadow))
            .style(Style::default().bg(self.color))
            .render(area, buf);
    }
}
