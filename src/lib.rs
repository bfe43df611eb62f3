//! Modal alert dialogs for ratatui applications.
//!
//! An [`Alert`] is a themed card with an optional image, a title and a stack
//! of [`Button`]s. A [`Presenter`] shows it modally over the current screen:
//! the screen is dimmed, and after a short entrance delay the card animates
//! in. Activating a button runs its action and dismisses the alert, which
//! resets the [`Binding`] that asked for it.
//!
//! ```no_run
//! use modalert::{Alert, Binding, Button, Presenter};
//!
//! let presenter = Presenter::default();
//! let is_presented = Binding::new(true);
//! presenter.present(&is_presented, || {
//!     Alert::new("Delete file?").with_buttons(vec![
//!         Button::new("Cancel"),
//!         Button::new("Delete").with_action(|| println!("deleted")),
//!     ])
//! });
//! ```

pub mod alert;
pub mod animation;
pub mod binding;
pub mod button;
pub mod color;
pub mod config;
pub mod font;
pub mod host;
pub mod presenter;
pub mod theme;
pub mod ui;
pub mod units;

pub use alert::Alert;
pub use animation::{Animation, AnimationKind, Curve, Edge, Transition};
pub use binding::Binding;
pub use button::{Button, DismissAction};
pub use font::{Font, TextStyle, Weight};
pub use host::PresentationHost;
pub use presenter::{PresentationId, PresentationPhase, Presenter, PresenterEvent};
pub use theme::Theme;
pub use ui::{Component, EventResult};
