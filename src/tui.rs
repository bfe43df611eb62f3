//! Terminal UI wrapper.
//!
//! [`Tui`] owns the ratatui terminal, switches it into raw mode and the
//! alternate screen, and feeds input, tick and render events into a channel.

use std::io::Stdout;
use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use color_eyre::eyre::eyre;
use crossterm::cursor;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, EventStream, KeyCode,
    KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use futures::{FutureExt, StreamExt};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(500);
const FORCEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

pub type Backend = CrosstermBackend<Stdout>;

#[derive(Clone, Debug)]
pub enum Event {
    Quit,
    Error(String),
    Tick,
    Render,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

pub struct Tui {
    terminal: Terminal<Backend>,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    frame_rate: f64,
    tick_rate: f64,
}

impl Tui {
    /// Create a TUI rendering `frame_rate` times and ticking `tick_rate`
    /// times per second.
    pub fn new(frame_rate: f64, tick_rate: f64) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal: Terminal::new(Backend::new(std::io::stdout()))?,
            task: tokio::spawn(async {}),
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate,
            tick_rate,
        })
    }

    pub fn enter(&mut self) -> color_eyre::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> color_eyre::Result<()> {
        self.stop()?;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            crossterm::execute!(
                std::io::stdout(),
                DisableMouseCapture,
                LeaveAlternateScreen,
                cursor::Show
            )?;
            crossterm::terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    /// Restore the terminal and stop the process with SIGTSTP.
    pub fn suspend(&mut self) -> color_eyre::Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::SIGTSTP)?;
        Ok(())
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    fn start(&mut self) {
        self.cancellation_token.cancel();
        self.cancellation_token = CancellationToken::new();
        self.task = tokio::spawn(Self::event_loop(
            self.event_tx.clone(),
            self.cancellation_token.clone(),
            self.tick_rate,
            self.frame_rate,
        ));
    }

    fn stop(&mut self) -> color_eyre::Result<()> {
        self.cancellation_token.cancel();
        let started = Instant::now();
        while !self.task.is_finished() {
            let waited = started.elapsed();
            if waited >= FORCEFUL_SHUTDOWN_TIMEOUT {
                return Err(eyre!("Terminal event task still running after {waited:?}"));
            }
            if waited >= GRACEFUL_SHUTDOWN_TIMEOUT {
                self.task.abort();
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        Ok(())
    }

    async fn event_loop(
        event_tx: UnboundedSender<Event>,
        cancellation_token: CancellationToken,
        tick_rate: f64,
        frame_rate: f64,
    ) {
        let mut event_stream = EventStream::new();
        let mut tick_interval = interval(Duration::from_secs_f64(1.0 / tick_rate));
        let mut frame_interval = interval(Duration::from_secs_f64(1.0 / frame_rate));

        #[cfg(unix)]
        {
            let sigterm_tx = event_tx.clone();
            tokio::spawn(async move {
                match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        sigterm.recv().await;
                        let _ = sigterm_tx.send(Event::Quit);
                    }
                    Err(e) => warn!("Failed to install SIGTERM handler: {e}"),
                }
            });
        }

        loop {
            let event = tokio::select! {
                () = cancellation_token.cancelled() => break,
                _ = tick_interval.tick() => Event::Tick,
                _ = frame_interval.tick() => Event::Render,
                input = event_stream.next().fuse() => match input {
                    Some(Ok(input)) => match translate(input) {
                        Some(event) => event,
                        None => continue,
                    },
                    Some(Err(e)) => Event::Error(e.to_string()),
                    None => break,
                },
            };
            if event_tx.send(event).is_err() {
                break;
            }
        }
        cancellation_token.cancel();
    }
}

/// Map terminal input to an app event. Key releases, repeats, bare mouse
/// motion, focus changes and pastes are dropped.
fn translate(input: CrosstermEvent) -> Option<Event> {
    match input {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Press => None,
        CrosstermEvent::Key(key)
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Event::Quit)
        }
        CrosstermEvent::Key(key) => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => None,
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

impl Deref for Tui {
    type Target = Terminal<Backend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!("Failed to restore terminal: {e}");
        }
    }
}
