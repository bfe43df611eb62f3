//! Full-screen scrim that brings an alert in after a short delay.
//!
//! A [`PresentationHost`] is mounted as soon as its alert is presented, but
//! the alert itself only appears once the entrance delay has elapsed. Until
//! then only the dimmed scrim is visible.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier};
use tracing::debug;

use crate::alert::Alert;
use crate::animation::Appearance;
use crate::binding::Binding;
use crate::color;
use crate::config::{DialogAction, KeyResolver};
use crate::ui::EventResult;

/// Pause between presentation and the start of the entrance animation.
pub const ENTRANCE_DELAY: Duration = Duration::from_millis(300);
pub const SCRIM_OPACITY: f64 = 0.25;
const SCRIM_COLOR: Color = Color::Black;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The button at this index was activated.
    Activated(usize),
}

#[derive(Debug)]
pub struct PresentationHost {
    visible: Binding,
    alert: Alert,
    show: bool,
    entrance_deadline: Option<Instant>,
    entrance_fired: bool,
    shown_at: Option<Instant>,
    focus: usize,
    button_areas: Vec<Rect>,
}

impl PresentationHost {
    #[must_use]
    pub const fn new(visible: Binding, alert: Alert) -> Self {
        Self {
            visible,
            alert,
            show: false,
            entrance_deadline: None,
            entrance_fired: false,
            shown_at: None,
            focus: 0,
            button_areas: Vec::new(),
        }
    }

    /// Schedule the entrance. Only the first call has an effect.
    pub fn on_appear(&mut self, now: Instant) {
        if self.entrance_deadline.is_some() {
            return;
        }
        self.entrance_deadline = Some(now + ENTRANCE_DELAY);
        debug!(title = self.alert.title(), "Alert appeared, entrance scheduled");
    }

    /// Fire the entrance timer once its deadline has passed.
    ///
    /// The timer fires exactly once. If the binding was reset in the
    /// meantime, firing does nothing and the alert never shows.
    pub fn tick(&mut self, now: Instant) {
        let Some(deadline) = self.entrance_deadline else {
            return;
        };
        if self.entrance_fired || now < deadline {
            return;
        }
        self.entrance_fired = true;
        if self.visible.get() {
            self.show = true;
            self.shown_at = Some(now);
            debug!(title = self.alert.title(), "Alert entrance started");
        } else {
            debug!(title = self.alert.title(), "Alert no longer visible, entrance skipped");
        }
    }

    #[must_use]
    pub const fn is_showing(&self) -> bool {
        self.show
    }

    /// Whether the entrance animation has played to completion.
    #[must_use]
    pub fn is_entrance_finished(&self, now: Instant) -> bool {
        self.shown_at.is_some_and(|at| {
            self.alert
                .animation()
                .is_finished(now.saturating_duration_since(at))
        })
    }

    #[must_use]
    pub const fn alert(&self) -> &Alert {
        &self.alert
    }

    #[must_use]
    pub const fn visible(&self) -> &Binding {
        &self.visible
    }

    /// Index of the focused button.
    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    fn focus_next(&mut self) {
        let count = self.alert.buttons().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    fn focus_previous(&mut self) {
        let count = self.alert.buttons().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Handle a key while mounted. All keys are consumed; the alert is modal.
    pub fn handle_key(&mut self, key: &KeyEvent, resolver: &KeyResolver) -> EventResult<HostEvent> {
        if !self.show {
            return EventResult::Consumed;
        }
        if resolver.matches_dialog(key, DialogAction::Next) {
            self.focus_next();
        } else if resolver.matches_dialog(key, DialogAction::Previous) {
            self.focus_previous();
        } else if resolver.matches_dialog(key, DialogAction::Activate)
            && self.focus < self.alert.buttons().len()
        {
            return HostEvent::Activated(self.focus).into();
        }
        EventResult::Consumed
    }

    /// Handle a click at a screen position, hit-testing the rendered buttons.
    pub fn handle_click(&mut self, column: u16, row: u16) -> EventResult<HostEvent> {
        if !self.show {
            return EventResult::Consumed;
        }
        let position = Position::new(column, row);
        match self.button_areas.iter().position(|area| area.contains(position)) {
            Some(index) => {
                self.focus = index;
                HostEvent::Activated(index).into()
            }
            None => EventResult::Consumed,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, now: Instant) {
        dim(buf, area);
        if !self.show {
            self.button_areas.clear();
            return;
        }

        let layout = self.alert.layout(area);
        let elapsed = self
            .shown_at
            .map_or(Duration::ZERO, |at| now.saturating_duration_since(at));
        let appearance = self.alert.animation().appearance(elapsed, layout.card, area);
        let card = self.alert.render_card(&layout, Some(self.focus));
        composite(&card, buf, appearance);

        // buttons are only clickable where they are drawn, once settled
        self.button_areas = if self.alert.animation().is_finished(elapsed) {
            layout.buttons.iter().map(|slot| slot.area).collect()
        } else {
            Vec::new()
        };
    }
}

/// Darken everything in `area` by the scrim.
fn dim(buf: &mut Buffer, area: Rect) {
    let area = area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            if color::to_rgb(cell.bg).is_some() {
                cell.bg = color::blend(SCRIM_COLOR, cell.bg, SCRIM_OPACITY);
            } else {
                cell.modifier |= Modifier::DIM;
            }
            if color::to_rgb(cell.fg).is_some() {
                cell.fg = color::blend(SCRIM_COLOR, cell.fg, SCRIM_OPACITY);
            }
        }
    }
}

/// Copy `card` onto `buf` stretched to the appearance rect, faded by its
/// opacity.
fn composite(card: &Buffer, buf: &mut Buffer, appearance: Appearance) {
    let rect = appearance.rect;
    let source = card.area;
    let target = rect.intersection(buf.area);
    if target.is_empty() || source.is_empty() || appearance.opacity <= 0.0 {
        return;
    }

    for y in target.top()..target.bottom() {
        let sy = source.y + sample(y - rect.y, rect.height, source.height);
        for x in target.left()..target.right() {
            let sx = source.x + sample(x - rect.x, rect.width, source.width);
            let (Some(src), Some(dst)) = (card.cell((sx, sy)), buf.cell_mut((x, y))) else {
                continue;
            };
            let backdrop = dst.bg;
            dst.set_symbol(src.symbol());
            dst.fg = color::blend(src.fg, backdrop, appearance.opacity);
            dst.bg = if src.bg == Color::Reset {
                backdrop
            } else {
                color::blend(src.bg, backdrop, appearance.opacity)
            };
            dst.modifier = src.modifier;
        }
    }
}

/// Nearest source index for `offset` when stretching `source` cells over
/// `target` cells.
fn sample(offset: u16, target: u16, source: u16) -> u16 {
    let index = u32::from(offset) * u32::from(source) / u32::from(target.max(1));
    u16::try_from(index)
        .unwrap_or(u16::MAX)
        .min(source.saturating_sub(1))
}
