//! The alert card.
//!
//! An [`Alert`] is a render-only description of one dialog: title, optional
//! image, buttons, theme and entrance animation. Layout is computed by
//! [`Alert::layout`] as plain rectangles so it can be inspected without a
//! terminal.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::animation::Animation;
use crate::button::{Button, ButtonPalette};
use crate::color;
use crate::font::{Font, TextStyle, Weight};
use crate::theme::Theme;
use crate::units;

pub const DEFAULT_FONT_NAME: &str = "Avenir";
pub const DEFAULT_IMAGE_SIZE: f32 = 55.0;
pub const DEFAULT_IMAGE_PADDING_TOP: f32 = 50.0;

pub const TITLE_PADDING_TOP: f32 = 35.0;
pub const TITLE_PADDING_SIDE: f32 = 25.0;
pub const TITLE_PADDING_BOTTOM: f32 = 15.0;

/// Padding around the card and around the button stack.
pub const STACK_PADDING: f32 = 16.0;
/// Gap between buttons laid out in a row.
pub const ROW_SPACING: f32 = 8.0;
/// Space below every button laid out in a column.
pub const COLUMN_BUTTON_SPACING: f32 = 10.0;
/// Button count from which buttons are stacked vertically.
pub const COLUMN_THRESHOLD: usize = 3;

/// Color the window is composited against when it is not fully opaque.
const WINDOW_BACKDROP: Color = Color::Black;
const BORDER_ALPHA: f64 = 0.3;

/// How the button stack is arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonArrangement {
    /// No buttons; nothing is rendered for the stack.
    Empty,
    /// Side by side, transparent background.
    Row,
    /// Top to bottom, filled with the theme button color.
    Column,
}

impl ButtonArrangement {
    #[must_use]
    pub const fn for_count(count: usize) -> Self {
        match count {
            0 => Self::Empty,
            n if n < COLUMN_THRESHOLD => Self::Row,
            _ => Self::Column,
        }
    }
}

/// Placement and colors of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSlot {
    pub area: Rect,
    pub palette: ButtonPalette,
    /// Rows left empty below the button.
    pub spacing_after: u16,
}

/// Resolved geometry of an alert inside a screen area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertLayout {
    pub card: Rect,
    /// Reserved for the image even when no image is set.
    pub image: Rect,
    pub title: Rect,
    pub arrangement: ButtonArrangement,
    pub buttons: Vec<ButtonSlot>,
}

/// A modal dialog card.
#[derive(Debug, Clone)]
pub struct Alert {
    title: String,
    font: Font,
    image_name: Option<String>,
    image_width: f32,
    image_height: f32,
    image_padding_top: f32,
    buttons: Vec<Button>,
    theme: Theme,
    animation: Animation,
}

impl Alert {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            font: Font::new(DEFAULT_FONT_NAME, TextStyle::Title2, Weight::Light),
            image_name: None,
            image_width: DEFAULT_IMAGE_SIZE,
            image_height: DEFAULT_IMAGE_SIZE,
            image_padding_top: DEFAULT_IMAGE_PADDING_TOP,
            buttons: vec![Button::default()],
            theme: Theme::default(),
            animation: Animation::default(),
        }
    }

    #[must_use]
    pub fn with_image(mut self, name: impl Into<String>) -> Self {
        self.image_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_image_size(mut self, width: f32, height: f32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    #[must_use]
    pub const fn with_image_padding_top(mut self, padding: f32) -> Self {
        self.image_padding_top = padding;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Replace the button stack. Order is display order.
    #[must_use]
    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn font(&self) -> &Font {
        &self.font
    }

    #[must_use]
    pub fn image_name(&self) -> Option<&str> {
        self.image_name.as_deref()
    }

    #[must_use]
    pub const fn image_size(&self) -> (f32, f32) {
        (self.image_width, self.image_height)
    }

    #[must_use]
    pub const fn image_padding_top(&self) -> f32 {
        self.image_padding_top
    }

    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub const fn animation(&self) -> &Animation {
        &self.animation
    }

    #[must_use]
    pub const fn arrangement(&self) -> ButtonArrangement {
        ButtonArrangement::for_count(self.buttons.len())
    }

    /// Lay the alert out inside `area`, centered vertically.
    ///
    /// Content that does not fit is clipped to the card.
    #[must_use]
    pub fn layout(&self, area: Rect) -> AlertLayout {
        let pad_x = units::cols(STACK_PADDING);
        let pad_y = units::rows(STACK_PADDING);
        let card_width = area.width.saturating_sub(2 * pad_x);
        let inner_width = card_width.saturating_sub(2);

        let image_top = units::rows(self.image_padding_top);
        let image_width = units::cols(self.image_width).min(inner_width);
        let image_height = units::rows(self.image_height);

        let title_top = units::rows(TITLE_PADDING_TOP);
        let title_side = units::cols(TITLE_PADDING_SIDE);
        let title_bottom = units::rows(TITLE_PADDING_BOTTOM);
        let title_width = inner_width.saturating_sub(2 * title_side);
        let title_height = wrapped_height(&self.title, title_width);

        let arrangement = self.arrangement();
        let sizes: Vec<(u16, u16)> = self.buttons.iter().map(Button::size_in_cells).collect();
        let stack_x = units::cols(STACK_PADDING);
        let stack_y = units::rows(STACK_PADDING);
        let row_gap = units::cols(ROW_SPACING);
        let column_gap = units::rows(COLUMN_BUTTON_SPACING);
        let stack_height = match arrangement {
            ButtonArrangement::Empty => 0,
            ButtonArrangement::Row => {
                let tallest = sizes.iter().map(|&(_, h)| h).max().unwrap_or(0);
                tallest.saturating_add(2 * stack_y)
            }
            ButtonArrangement::Column => sizes
                .iter()
                .fold(2 * stack_y, |acc, &(_, h)| acc.saturating_add(h).saturating_add(column_gap)),
        };

        let content_height = [
            image_top,
            image_height,
            title_top,
            title_height,
            title_bottom,
            stack_height,
        ]
        .into_iter()
        .fold(2u16, u16::saturating_add);
        let card_height = content_height.min(area.height.saturating_sub(2 * pad_y));
        let card = Rect::new(
            area.x.saturating_add(pad_x.min(area.width)),
            area.y + (area.height - card_height) / 2,
            card_width,
            card_height,
        );
        let inner = card.inner(Margin::new(1, 1));

        let mut y = inner.y.saturating_add(image_top);
        let image = Rect::new(
            inner.x + (inner.width - image_width.min(inner.width)) / 2,
            y,
            image_width,
            image_height,
        )
        .intersection(inner);
        y = y.saturating_add(image_height).saturating_add(title_top);

        let title = Rect::new(inner.x.saturating_add(title_side), y, title_width, title_height)
            .intersection(inner);
        y = y
            .saturating_add(title_height)
            .saturating_add(title_bottom)
            .saturating_add(stack_y);

        let text = self.theme.button_text_color;
        let mut buttons = Vec::with_capacity(sizes.len());
        match arrangement {
            ButtonArrangement::Empty => {}
            ButtonArrangement::Row => {
                let gaps = u16::try_from(sizes.len().saturating_sub(1)).unwrap_or(u16::MAX);
                let total = sizes
                    .iter()
                    .fold(row_gap.saturating_mul(gaps), |acc, &(w, _)| acc.saturating_add(w));
                let row_width = inner.width.saturating_sub(2 * stack_x);
                let mut x = inner.x + stack_x.min(inner.width) + row_width.saturating_sub(total) / 2;
                for &(width, height) in &sizes {
                    buttons.push(ButtonSlot {
                        area: Rect::new(x, y, width, height).intersection(inner),
                        palette: ButtonPalette {
                            fill: Color::Reset,
                            text,
                        },
                        spacing_after: 0,
                    });
                    x = x.saturating_add(width).saturating_add(row_gap);
                }
            }
            ButtonArrangement::Column => {
                for &(width, height) in &sizes {
                    let x = inner.x + inner.width.saturating_sub(width) / 2;
                    buttons.push(ButtonSlot {
                        area: Rect::new(x, y, width, height).intersection(inner),
                        palette: ButtonPalette {
                            fill: self.theme.button_color,
                            text,
                        },
                        spacing_after: column_gap,
                    });
                    y = y.saturating_add(height).saturating_add(column_gap);
                }
            }
        }

        AlertLayout {
            card,
            image,
            title,
            arrangement,
            buttons,
        }
    }

    /// Draw the card into a buffer covering exactly `layout.card`.
    #[must_use]
    pub fn render_card(&self, layout: &AlertLayout, focus: Option<usize>) -> Buffer {
        let mut buf = Buffer::empty(layout.card);
        if layout.card.is_empty() {
            return buf;
        }

        let fill = self.theme.window_fill(WINDOW_BACKDROP);
        Block::bordered()
            .border_type(self.theme.border_type())
            .border_style(Style::default().fg(color::blend(self.theme.text_color, fill, BORDER_ALPHA)))
            .style(Style::default().bg(fill))
            .render(layout.card, &mut buf);

        // the image slot stays reserved even without a name
        if let Some(name) = self.image_name.as_deref().filter(|name| !name.is_empty()) {
            let middle = Rect::new(
                layout.image.x,
                layout.image.y + layout.image.height / 2,
                layout.image.width,
                layout.image.height.min(1),
            );
            Paragraph::new(name)
                .style(
                    Style::default()
                        .fg(self.theme.text_color)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                )
                .alignment(Alignment::Center)
                .render(middle, &mut buf);
        }

        Paragraph::new(self.title.as_str())
            .style(
                Style::default()
                    .fg(self.theme.text_color)
                    .add_modifier(self.font.modifiers()),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout.title, &mut buf);

        for (index, (button, slot)) in self.buttons.iter().zip(&layout.buttons).enumerate() {
            button.render(slot.area, &mut buf, slot.palette, focus == Some(index));
        }

        buf
    }
}

/// Rows needed to word-wrap `text` into `width` columns.
fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = usize::from(width);
    let rows: usize = text
        .lines()
        .map(|line| {
            let mut rows = 1;
            let mut column = 0;
            for word in line.split_whitespace() {
                let word_width = Line::raw(word).width();
                if column > 0 && column + 1 + word_width > width {
                    rows += 1;
                    column = word_width;
                } else if column > 0 {
                    column += 1 + word_width;
                } else {
                    column = word_width;
                }
                while column > width {
                    rows += 1;
                    column -= width;
                }
            }
            rows
        })
        .sum();
    u16::try_from(rows.max(1)).unwrap_or(u16::MAX)
}
