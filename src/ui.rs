//! Component trait and input handling results.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::Frame;
use ratatui::layout::Rect;

/// Result of handling an input event.
///
/// - `Ignored` - The handler didn't recognize or handle this input
/// - `Consumed` - The input was handled but produced no event
/// - `Event(E)` - The input was handled and produced an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> EventResult<E> {
    /// Returns true if the input was consumed (either with or without an event).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Returns the event if present.
    pub fn event(self) -> Option<E> {
        match self {
            Self::Event(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the event type using the provided function.
    pub fn map<F, U>(self, f: F) -> EventResult<U>
    where
        F: FnOnce(E) -> U,
    {
        match self {
            Self::Ignored => EventResult::Ignored,
            Self::Consumed => EventResult::Consumed,
            Self::Event(e) => EventResult::Event(f(e)),
        }
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
///
/// Components handle input events, advance time-based state on ticks and
/// render themselves into a frame.
pub trait Component {
    /// The output type produced by this component.
    type Output;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> EventResult<Self::Output> {
        _ = key;
        EventResult::Ignored
    }

    /// Handle a mouse event.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> EventResult<Self::Output> {
        _ = mouse;
        EventResult::Ignored
    }

    /// Called on each tick for animations and time-based updates.
    fn handle_tick(&mut self) {}

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
