use color_eyre::eyre::OptionExt;
use crossterm::event::Event as CrosstermEvent;
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::api::types::Character;
use crate::refresh::RefreshGesture;
use crate::screen::FetchTicket;

/// Representation of all possible events.
#[derive(Debug)]
pub enum Event {
    /// An event that is emitted on a regular schedule.
    Tick,
    /// Crossterm events from the terminal.
    Crossterm(CrosstermEvent),
    /// Application-level events.
    App(Box<AppEvent>),
}

/// Application events for navigation, API requests, and API responses.
#[derive(Debug)]
pub enum AppEvent {
    // -- Navigation --
    Quit,
    ToggleHelp,

    // -- API request triggers (mount and pull-to-refresh) --
    FetchCharacters {
        refresh: Option<RefreshGesture>,
    },

    // -- API response events (sent from async tasks back to the event loop) --
    CharactersLoaded {
        ticket: FetchTicket,
        result: ApiResult<Vec<Character>>,
        refresh: Option<RefreshGesture>,
    },
    AvatarChecked {
        ticket: FetchTicket,
        id: i64,
        ok: bool,
    },
}

/// API result with the cause flattened to a message.
pub type ApiResult<T> = Result<T, String>;

/// Terminal event handler.
///
/// Spawns a background task that emits tick and crossterm events, and exposes
/// an unbounded channel for application events.
#[derive(Debug)]
pub struct EventHandler {
    /// Event sender channel.
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver channel.
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`] and spawns the event task.
    pub fn new(tick_rate_fps: f64) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = EventTask::new(sender.clone(), tick_rate_fps);
        tokio::spawn(async { actor.run().await });
        Self { sender, receiver }
    }

    /// Handler without the terminal task, fed only through [`send`](Self::send).
    #[cfg(test)]
    pub fn detached() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Receives the next event, blocking until one is available.
    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("Failed to receive event")
    }

    /// Queue an app event to be processed by the event loop.
    pub fn send(&self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(Box::new(app_event)));
    }

    /// Clone the underlying sender for use in spawned async tasks.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

/// Background task that reads crossterm events and emits ticks.
struct EventTask {
    sender: mpsc::UnboundedSender<Event>,
    tick_rate: Duration,
}

const DEFAULT_TICK_RATE_FPS: f64 = 30.0;
const MIN_TICK_RATE_FPS: f64 = 1.0;
const MAX_TICK_RATE_FPS: f64 = 240.0;

/// Tick period for a configured frame rate.
///
/// Non-finite or non-positive rates use the default; others are clamped to
/// 1..=240 fps. The result is never zero, which `tokio::time::interval`
/// rejects.
fn tick_interval(tick_rate_fps: f64) -> Duration {
    let default = Duration::from_secs_f64(1.0 / DEFAULT_TICK_RATE_FPS);
    let fps = if tick_rate_fps.is_finite() && tick_rate_fps > 0.0 {
        tick_rate_fps.clamp(MIN_TICK_RATE_FPS, MAX_TICK_RATE_FPS)
    } else {
        DEFAULT_TICK_RATE_FPS
    };
    Duration::try_from_secs_f64(1.0 / fps)
        .unwrap_or(default)
        .max(Duration::from_millis(1))
}

impl EventTask {
    fn new(sender: mpsc::UnboundedSender<Event>, tick_rate_fps: f64) -> Self {
        Self {
            sender,
            tick_rate: tick_interval(tick_rate_fps),
        }
    }

    async fn run(self) -> color_eyre::Result<()> {
        let mut reader = crossterm::event::EventStream::new();
        let mut tick = tokio::time::interval(self.tick_rate);
        loop {
            let tick_delay = tick.tick();
            let crossterm_event = reader.next().fuse();
            tokio::select! {
                _ = self.sender.closed() => {
                    break;
                }
                _ = tick_delay => {
                    self.send(Event::Tick);
                }
                Some(Ok(evt)) = crossterm_event => {
                    self.send(Event::Crossterm(evt));
                }
            };
        }
        Ok(())
    }

    fn send(&self, event: Event) {
        let _ = self.sender.send(event);
    }
}
