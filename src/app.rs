use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseEvent};
use modalert::config::{AppConfig, GlobalAction, KeyResolver};
use modalert::theme;
use modalert::{Alert, AnimationKind, Binding, Button, Component, EventResult, Presenter, Theme};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tracing::{debug, error, info};

use crate::cli::Args;
use crate::tui::{Event, Tui};

const FRAME_RATE: f64 = 60.0;
const TICK_RATE: f64 = 30.0;

/// Background screen the alerts are presented over.
struct HomeScreen {
    resolver: Arc<KeyResolver>,
    theme: Theme,
    last_pressed: Rc<RefCell<Option<String>>>,
}

impl Component for HomeScreen {
    type Output = GlobalAction;

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<Self::Output> {
        [GlobalAction::Present, GlobalAction::Suspend, GlobalAction::Quit]
            .into_iter()
            .find(|action| self.resolver.matches_global(&key, *action))
            .map_or(EventResult::Ignored, EventResult::Event)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" modalert ")
            .style(Style::default().fg(self.theme.text_color).bg(self.theme.window_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [_, hints, status, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let hint = |action: GlobalAction, label: &'static str| {
            [
                Span::styled(self.resolver.display_global(action), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" {label}  ")),
            ]
        };
        let line: Line = hint(GlobalAction::Present, "present")
            .into_iter()
            .chain(hint(GlobalAction::Suspend, "suspend"))
            .chain(hint(GlobalAction::Quit, "quit"))
            .collect();
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), hints);

        let text = self
            .last_pressed
            .borrow()
            .as_ref()
            .map_or_else(|| "No button pressed yet".to_string(), |label| format!("Last pressed: {label}"));
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), status);
    }
}

pub struct App {
    presenter: Presenter,
    is_presented: Binding,
    home: HomeScreen,
    theme: Theme,
    animation: AnimationKind,
    title: String,
    image: Option<String>,
    button_count: usize,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(config: &AppConfig, resolver: Arc<KeyResolver>) -> Self {
        let theme = config.theme.theme();
        let last_pressed = Rc::new(RefCell::new(None));
        Self {
            presenter: Presenter::new(Arc::clone(&resolver)),
            is_presented: Binding::new(false),
            home: HomeScreen {
                resolver,
                theme,
                last_pressed,
            },
            theme,
            animation: config.alert.animation,
            title: "Delete file?".to_string(),
            image: None,
            button_count: 2,
            should_quit: false,
            should_suspend: false,
        }
    }

    /// Command line flags take precedence over the config file.
    pub fn apply_cli_args(&mut self, args: &Args) {
        self.title.clone_from(&args.title);
        self.image.clone_from(&args.image);
        self.button_count = args.buttons;
        if let Some(animation) = args.animation {
            self.animation = animation;
        }
        if let Some(name) = &args.theme {
            self.theme = theme::theme_from_name(name);
            self.home.theme = self.theme;
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        while let Some(event) = tui.next_event().await {
            self.handle_event(&mut tui, event)?;
            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        info!("Exiting modalert");
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> color_eyre::Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Tick => self.presenter.handle_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Error(message) => error!("Terminal event error: {message}"),
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.presenter.handle_key(key).is_consumed() {
            return;
        }
        match self.home.handle_key(key).event() {
            Some(GlobalAction::Present) => self.present(),
            Some(GlobalAction::Suspend) => self.should_suspend = true,
            Some(GlobalAction::Quit) => self.should_quit = true,
            None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let Some(event) = self.presenter.handle_mouse(mouse).event() {
            debug!(?event, "Alert closed by mouse");
        }
    }

    fn present(&self) {
        self.is_presented.set(true);
        self.presenter.present(&self.is_presented, || self.build_alert());
    }

    fn build_alert(&self) -> Alert {
        let buttons = button_labels(self.button_count)
            .into_iter()
            .map(|label| {
                let last_pressed = Rc::clone(&self.home.last_pressed);
                let pressed = label.clone();
                Button::new(label).with_action(move || *last_pressed.borrow_mut() = Some(pressed.clone()))
            })
            .collect();

        let alert = Alert::new(self.title.clone())
            .with_theme(self.theme)
            .with_animation(self.animation.animation())
            .with_buttons(buttons);
        match &self.image {
            Some(image) => alert.with_image(image.clone()),
            None => alert,
        }
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            self.home.render(frame, area);
            self.presenter.render(frame, area);
        })?;
        Ok(())
    }
}

fn button_labels(count: usize) -> Vec<String> {
    match count {
        1 => vec![modalert::button::DEFAULT_LABEL.to_string()],
        2 => vec!["Cancel".to_string(), "Delete".to_string()],
        n => (1..=n).map(|i| format!("Option {i}")).collect(),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use modalert::config::keybindings::KeybindingsConfig;

    use super::*;

    fn app() -> App {
        let config = AppConfig::default();
        App::new(&config, Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default()))))
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_button_labels() {
        assert!(button_labels(0).is_empty());
        assert_eq!(button_labels(1), vec!["Ok"]);
        assert_eq!(button_labels(2), vec!["Cancel", "Delete"]);
        assert_eq!(button_labels(3), vec!["Option 1", "Option 2", "Option 3"]);
    }

    #[test]
    fn test_present_key_presents_alert() {
        let mut app = app();
        app.handle_key(key('p'));

        assert!(app.is_presented.get());
        assert_eq!(app.presenter.len(), 1);
        // the alert is modal, so quit is swallowed
        app.handle_key(key('q'));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_without_alert() {
        let mut app = app();
        app.handle_key(key('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_escape_closes_alert() {
        let mut app = app();
        app.handle_key(key('p'));
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));

        assert!(!app.is_presented.get());
        assert!(app.presenter.is_empty());
    }
}
