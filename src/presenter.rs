//! Modal presentation of alerts.
//!
//! The [`Presenter`] owns the stack of presented alerts and remembers which
//! one is *current*: the one a button's dismiss action closes. It is a cheap
//! cloneable handle; create one per application and pass it to whoever
//! needs to present alerts.
//!
//! # Lifecycle
//!
//! ```text
//! Idle -> Requested -> Presented -> EntranceDelay -> Visible -> Dismissing -> Idle
//! ```
//!
//! - `present` with a true binding pushes a controller and starts the
//!   entrance delay.
//! - After [`ENTRANCE_DELAY`](crate::host::ENTRANCE_DELAY) the alert animates
//!   in if the binding is still true.
//! - Activating a button runs its action, then dismisses the current
//!   controller.
//! - Every dismissal resets the controller's binding to false.
//!
//! # Constraints
//!
//! Only the first of several concurrently presented alerts is tracked as
//! current. Presenting a second alert while one is tracked stacks it on top,
//! but its buttons still dismiss the tracked one. Only one alert's
//! button-driven dismissal is reliable at a time.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use tracing::{debug, info, warn};

use crate::alert::Alert;
use crate::binding::Binding;
use crate::button::DismissAction;
use crate::config::{DialogAction, KeyResolver};
use crate::host::{HostEvent, PresentationHost};
use crate::ui::{Component, EventResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PresentationId(u64);

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a controller covers the screen below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationStyle {
    /// Drawn over the current screen, which stays visible underneath.
    #[default]
    OverCurrentContext,
}

/// Transition of the controller itself, separate from the alert's entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalTransition {
    #[default]
    CrossDissolve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationPhase {
    Idle,
    Requested,
    Presented,
    EntranceDelay,
    Visible,
    Dismissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterEvent {
    /// A button ran and the current alert was dismissed.
    Activated {
        id: PresentationId,
        button: usize,
    },
    /// An alert was closed without activating a button.
    Dismissed(PresentationId),
}

/// One presented alert: its host plus the binding it resets on disappearance.
#[derive(Debug)]
pub struct PresentationController {
    id: PresentationId,
    host: PresentationHost,
    is_presented: Binding,
    style: PresentationStyle,
    transition: ModalTransition,
    backing: Color,
}

impl PresentationController {
    fn new(id: PresentationId, host: PresentationHost, is_presented: Binding) -> Self {
        Self {
            id,
            host,
            is_presented,
            style: PresentationStyle::OverCurrentContext,
            transition: ModalTransition::CrossDissolve,
            backing: Color::Reset,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PresentationId {
        self.id
    }

    #[must_use]
    pub const fn host(&self) -> &PresentationHost {
        &self.host
    }

    #[must_use]
    pub const fn style(&self) -> PresentationStyle {
        self.style
    }

    #[must_use]
    pub const fn transition(&self) -> ModalTransition {
        self.transition
    }

    /// Background behind the host; `Reset` keeps the screen below visible.
    #[must_use]
    pub const fn backing(&self) -> Color {
        self.backing
    }

    fn will_disappear(&self) {
        self.is_presented.set(false);
    }

    fn phase(&self) -> PresentationPhase {
        if self.host.is_showing() {
            PresentationPhase::Visible
        } else {
            PresentationPhase::EntranceDelay
        }
    }
}

#[derive(Debug, Default)]
struct PresenterState {
    stack: Vec<PresentationController>,
    current: Option<PresentationId>,
    next_id: u64,
}

impl PresenterState {
    fn allocate_id(&mut self) -> PresentationId {
        self.next_id += 1;
        PresentationId(self.next_id)
    }

    fn position(&self, id: PresentationId) -> Option<usize> {
        self.stack.iter().position(|c| c.id == id)
    }
}

enum TopInput {
    Dismiss,
    Host(EventResult<HostEvent>),
}

/// Owner of the modal stack and the tracked current alert.
#[derive(Clone, Default)]
pub struct Presenter {
    state: Rc<RefCell<PresenterState>>,
    resolver: Arc<KeyResolver>,
}

impl Presenter {
    #[must_use]
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            state: Rc::default(),
            resolver,
        }
    }

    /// Present the alert built by `content` if `is_presented` is true, or
    /// dismiss the current alert if it is false.
    ///
    /// Returns the id of the pushed controller when one was presented.
    pub fn present<F>(&self, is_presented: &Binding, content: F) -> Option<PresentationId>
    where
        F: FnOnce() -> Alert,
    {
        self.present_at(is_presented, content, Instant::now())
    }

    /// [`present`](Self::present) with an explicit clock.
    pub fn present_at<F>(&self, is_presented: &Binding, content: F, now: Instant) -> Option<PresentationId>
    where
        F: FnOnce() -> Alert,
    {
        let alert = content();
        if !is_presented.get() {
            debug!(title = alert.title(), "Binding is false, dismissing current alert");
            self.dismiss_current();
            return None;
        }

        let mut state = self.state.borrow_mut();
        let id = state.allocate_id();
        debug!(%id, phase = ?PresentationPhase::Requested, title = alert.title(), "Alert requested");

        let host = PresentationHost::new(is_presented.clone(), alert);
        let mut controller = PresentationController::new(id, host, is_presented.clone());
        match state.current {
            None => state.current = Some(id),
            Some(current) => warn!(
                %id,
                %current,
                "Alert presented while another is current; its buttons dismiss the current one"
            ),
        }

        controller.host.on_appear(now);
        state.stack.push(controller);
        info!(%id, phase = ?PresentationPhase::Presented, depth = state.stack.len(), "Alert presented");
        Some(id)
    }

    /// Dismiss the tracked current alert and clear the tracked reference.
    ///
    /// Returns false if nothing was tracked.
    pub fn dismiss_current(&self) -> bool {
        let Some(id) = self.state.borrow_mut().current.take() else {
            return false;
        };
        self.dismiss(id);
        true
    }

    /// Dismiss one presented alert.
    ///
    /// Its binding is reset to false, and if it is the current alert the
    /// tracked reference is cleared. Returns false for unknown ids.
    pub fn dismiss(&self, id: PresentationId) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            if state.current == Some(id) {
                state.current = None;
            }
            state.position(id).map(|index| state.stack.remove(index))
        };

        let Some(controller) = removed else {
            return false;
        };
        debug!(%id, phase = ?PresentationPhase::Dismissing, "Alert dismissing");
        // released first: button actions re-enter dismiss through the dismiss action
        controller.will_disappear();
        info!(%id, "Alert dismissed");
        true
    }

    /// Dismiss action handed to buttons of alerts presented here.
    #[must_use]
    pub fn dismiss_action(&self) -> DismissAction {
        let presenter = self.clone();
        DismissAction::new(move || {
            presenter.dismiss_current();
        })
    }

    #[must_use]
    pub fn current(&self) -> Option<PresentationId> {
        self.state.borrow().current
    }

    #[must_use]
    pub fn is_presenting(&self) -> bool {
        !self.state.borrow().stack.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().stack.is_empty()
    }

    /// Ids of presented alerts, bottom to top.
    #[must_use]
    pub fn presented(&self) -> Vec<PresentationId> {
        self.state.borrow().stack.iter().map(|c| c.id).collect()
    }

    #[must_use]
    pub fn phase(&self, id: PresentationId) -> PresentationPhase {
        let state = self.state.borrow();
        state
            .position(id)
            .map_or(PresentationPhase::Idle, |index| state.stack[index].phase())
    }

    /// Inspect a presented controller.
    pub fn with_controller<R>(&self, id: PresentationId, f: impl FnOnce(&PresentationController) -> R) -> Option<R> {
        let state = self.state.borrow();
        state.position(id).map(|index| f(&state.stack[index]))
    }

    /// Advance the entrance timers of all presented alerts.
    pub fn tick(&self, now: Instant) {
        for controller in &mut self.state.borrow_mut().stack {
            controller.host.tick(now);
        }
    }

    /// Draw all presented alerts, bottom to top.
    pub fn render_at(&self, area: Rect, buf: &mut Buffer, now: Instant) {
        for controller in &mut self.state.borrow_mut().stack {
            controller.host.render(area, buf, now);
        }
    }

    /// Route a key to the top-most alert.
    ///
    /// The dismiss key closes that alert directly. Everything else is
    /// consumed while an alert is presented.
    pub fn key(&self, key: &KeyEvent) -> EventResult<PresenterEvent> {
        let input = {
            let mut state = self.state.borrow_mut();
            let Some(top) = state.stack.last_mut() else {
                return EventResult::Ignored;
            };
            if self.resolver.matches_dialog(key, DialogAction::Dismiss) {
                (top.id, TopInput::Dismiss)
            } else {
                (top.id, TopInput::Host(top.host.handle_key(key, &self.resolver)))
            }
        };
        self.resolve(input)
    }

    /// Route a left click to the top-most alert.
    pub fn click(&self, mouse: &MouseEvent) -> EventResult<PresenterEvent> {
        let input = {
            let mut state = self.state.borrow_mut();
            let Some(top) = state.stack.last_mut() else {
                return EventResult::Ignored;
            };
            if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                return EventResult::Consumed;
            }
            (top.id, TopInput::Host(top.host.handle_click(mouse.column, mouse.row)))
        };
        self.resolve(input)
    }

    fn resolve(&self, (id, input): (PresentationId, TopInput)) -> EventResult<PresenterEvent> {
        match input {
            TopInput::Dismiss => {
                self.dismiss(id);
                PresenterEvent::Dismissed(id).into()
            }
            TopInput::Host(EventResult::Event(HostEvent::Activated(index))) => {
                self.activate(id, index);
                PresenterEvent::Activated { id, button: index }.into()
            }
            TopInput::Host(EventResult::Ignored) => EventResult::Ignored,
            TopInput::Host(EventResult::Consumed) => EventResult::Consumed,
        }
    }

    fn activate(&self, id: PresentationId, index: usize) {
        let button = self.with_controller(id, |c| c.host.alert().buttons().get(index).cloned());
        let Some(button) = button.flatten() else {
            return;
        };
        debug!(%id, label = button.label(), "Button activated");
        // the action may present or dismiss alerts, so no borrow is held
        button.activate(&self.dismiss_action());
    }
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Presenter")
            .field("presented", &state.stack.iter().map(|c| c.id).collect::<Vec<_>>())
            .field("current", &state.current)
            .finish_non_exhaustive()
    }
}

impl Component for Presenter {
    type Output = PresenterEvent;

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<Self::Output> {
        self.key(&key)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> EventResult<Self::Output> {
        self.click(&mouse)
    }

    fn handle_tick(&mut self) {
        self.tick(Instant::now());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.render_at(area, frame.buffer_mut(), Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::button::Button;
    use crate::host::ENTRANCE_DELAY;

    const SCREEN: Rect = Rect::new(0, 0, 80, 40);

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .flat_map(|y| (area.left()..area.right()).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_present_tracks_first_controller() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);

        let id = presenter.present(&shown, || Alert::new("Hello")).unwrap();

        assert_eq!(presenter.current(), Some(id));
        assert_eq!(presenter.presented(), vec![id]);
        assert_eq!(presenter.phase(id), PresentationPhase::EntranceDelay);
        let (style, transition, backing) = presenter
            .with_controller(id, |c| (c.style(), c.transition(), c.backing()))
            .unwrap();
        assert_eq!(style, PresentationStyle::OverCurrentContext);
        assert_eq!(transition, ModalTransition::CrossDissolve);
        assert_eq!(backing, Color::Reset);
    }

    #[test]
    fn test_present_with_false_binding_dismisses_current() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);
        let id = presenter.present(&shown, || Alert::new("Hello")).unwrap();

        shown.set(false);
        assert_eq!(presenter.present(&shown, || Alert::new("Hello")), None);

        assert!(presenter.is_empty());
        assert_eq!(presenter.current(), None);
        assert_eq!(presenter.phase(id), PresentationPhase::Idle);
    }

    #[test]
    fn test_second_present_does_not_replace_current() {
        let presenter = Presenter::default();
        let first_shown = Binding::new(true);
        let second_shown = Binding::new(true);

        let first = presenter.present(&first_shown, || Alert::new("First")).unwrap();
        let second = presenter.present(&second_shown, || Alert::new("Second")).unwrap();

        assert_eq!(presenter.presented(), vec![first, second]);
        assert_eq!(presenter.current(), Some(first));

        // a button dismissal targets the tracked alert, not the top one
        presenter.dismiss_action().call();
        assert_eq!(presenter.presented(), vec![second]);
        assert!(!first_shown.get());
        assert!(second_shown.get());
        assert_eq!(presenter.current(), None);
    }

    #[test]
    fn test_external_dismiss_resets_binding_and_tracking() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);
        let id = presenter.present(&shown, || Alert::new("Hello")).unwrap();

        assert!(presenter.dismiss(id));
        assert!(!shown.get());
        assert_eq!(presenter.current(), None);
        assert!(!presenter.dismiss(id));
        assert!(!presenter.dismiss_current());
    }

    #[test]
    fn test_escape_dismisses_top() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);
        let id = presenter.present(&shown, || Alert::new("Hello")).unwrap();

        assert_eq!(
            presenter.key(&key(KeyCode::Esc)),
            EventResult::Event(PresenterEvent::Dismissed(id))
        );
        assert!(!shown.get());
        assert!(presenter.is_empty());
        assert_eq!(presenter.key(&key(KeyCode::Esc)), EventResult::Ignored);
    }

    #[test]
    fn test_keys_are_swallowed_during_entrance_delay() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);
        presenter.present(&shown, || Alert::new("Hello"));

        assert_eq!(presenter.key(&key(KeyCode::Enter)), EventResult::Consumed);
        assert!(shown.get());
    }

    #[test]
    fn test_action_may_present_again() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);
        let follow_up = Binding::new(true);

        let inner = presenter.clone();
        let inner_binding = follow_up.clone();
        let start = Instant::now();
        presenter.present_at(
            &shown,
            || {
                Alert::new("Step one").with_buttons(vec![Button::new("Next").with_action(move || {
                    inner.present(&inner_binding, || Alert::new("Step two"));
                })])
            },
            start,
        );
        presenter.tick(start + ENTRANCE_DELAY);

        let result = presenter.key(&key(KeyCode::Enter));
        assert!(matches!(result, EventResult::Event(PresenterEvent::Activated { button: 0, .. })));
        // the follow-up was stacked, then the dismiss closed the tracked first alert
        assert_eq!(presenter.len(), 1);
        assert!(!shown.get());
        assert!(follow_up.get());
        assert_eq!(presenter.current(), None);
    }

    #[test]
    fn test_delete_file_scenario() {
        let presenter = Presenter::default();
        let shown = Binding::new(false);
        let log = Rc::new(RefCell::new(Vec::new()));

        // caller flips the flag, then presents
        shown.set(true);
        let delete_log = Rc::clone(&log);
        let start = Instant::now();
        let id = presenter
            .present_at(
                &shown,
                || {
                    Alert::new("Delete file?").with_buttons(vec![
                        Button::new("Cancel"),
                        Button::new("Delete").with_action(move || delete_log.borrow_mut().push("deleted")),
                    ])
                },
                start,
            )
            .unwrap();

        let layout = presenter
            .with_controller(id, |c| c.host().alert().layout(SCREEN))
            .unwrap();
        assert_eq!(layout.arrangement, crate::alert::ButtonArrangement::Row);

        // before the delay only the scrim is drawn
        let mut buf = Buffer::empty(SCREEN);
        presenter.tick(start + Duration::from_millis(100));
        presenter.render_at(SCREEN, &mut buf, start + Duration::from_millis(100));
        assert!(!screen_text(&buf).contains("Delete file?"));

        // after the delay the card animates in
        let visible_at = start + ENTRANCE_DELAY;
        presenter.tick(visible_at);
        assert_eq!(presenter.phase(id), PresentationPhase::Visible);
        let mut buf = Buffer::empty(SCREEN);
        presenter.render_at(SCREEN, &mut buf, visible_at + Duration::from_secs(1));
        assert!(screen_text(&buf).contains("Delete file?"));

        // focus "Delete" and activate it
        presenter.key(&key(KeyCode::Tab));
        let result = presenter.key(&key(KeyCode::Enter));

        assert_eq!(result, EventResult::Event(PresenterEvent::Activated { id, button: 1 }));
        assert_eq!(*log.borrow(), vec!["deleted"]);
        assert!(!shown.get());
        assert_eq!(presenter.current(), None);
        assert!(presenter.is_empty());
    }

    #[test]
    fn test_action_runs_before_dismiss() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);
        let observed = Rc::new(RefCell::new(Vec::new()));

        let probe_presenter = presenter.clone();
        let probe_binding = shown.clone();
        let probe = Rc::clone(&observed);
        let start = Instant::now();
        presenter.present_at(
            &shown,
            || {
                Alert::new("Order").with_buttons(vec![Button::new("Go").with_action(move || {
                    probe
                        .borrow_mut()
                        .push((probe_binding.get(), probe_presenter.current().is_some()));
                })])
            },
            start,
        );
        presenter.tick(start + ENTRANCE_DELAY);
        presenter.key(&key(KeyCode::Enter));

        // the action saw the alert still presented, exactly once
        assert_eq!(*observed.borrow(), vec![(true, true)]);
        assert!(!shown.get());
    }

    #[test]
    fn test_click_activates_button() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);
        let start = Instant::now();
        let id = presenter
            .present_at(
                &shown,
                || Alert::new("Pick").with_buttons(vec![Button::new("A"), Button::new("B"), Button::new("C")]),
                start,
            )
            .unwrap();
        presenter.tick(start + ENTRANCE_DELAY);
        let mut buf = Buffer::empty(SCREEN);
        presenter.render_at(SCREEN, &mut buf, start + Duration::from_secs(1));

        let third = presenter
            .with_controller(id, |c| c.host().alert().layout(SCREEN).buttons[2].area)
            .unwrap();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: third.x + 1,
            row: third.y + 1,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(
            presenter.click(&click),
            EventResult::Event(PresenterEvent::Activated { id, button: 2 })
        );
        assert!(!shown.get());
    }

    #[test]
    fn test_hidden_before_delay_never_shows() {
        let presenter = Presenter::default();
        let shown = Binding::new(true);
        let start = Instant::now();
        let id = presenter.present_at(&shown, || Alert::new("Hello"), start).unwrap();

        shown.set(false);
        presenter.tick(start + ENTRANCE_DELAY);
        assert_eq!(presenter.phase(id), PresentationPhase::EntranceDelay);
    }
}
