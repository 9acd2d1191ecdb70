use std::time::Duration;

use anyhow::{Result, anyhow};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

/// Frequency of [`Event::Tick`], per second.
const TICK_FPS: f64 = 4.0;
/// Frequency of [`Event::Render`], per second.
const RENDER_FPS: f64 = 30.0;

/// Terminal events.
#[derive(Clone, Copy, Debug)]
pub enum Event {
    /// Periodic state update.
    Tick,
    /// Time to draw a frame.
    Render,
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Terminal event handler.
///
/// A background task merges the timers with the terminal's input stream.
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawns the event task.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            if let Err(err) = event_loop(sender).await {
                tracing::error!(%err, "event loop stopped");
            }
        });
        Self { receiver }
    }

    /// Receives the next event.
    pub async fn next(&mut self) -> Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| anyhow!("event channel closed"))
    }
}

async fn event_loop(sender: mpsc::UnboundedSender<Event>) -> Result<()> {
    let mut reader = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_secs_f64(1.0 / TICK_FPS));
    let mut render = tokio::time::interval(Duration::from_secs_f64(1.0 / RENDER_FPS));

    loop {
        let event = tokio::select! {
            _ = sender.closed() => return Ok(()),
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            crossterm_event = reader.next().fuse() => match crossterm_event {
                Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => Event::Key(key),
                Some(Ok(CrosstermEvent::Mouse(mouse))) => Event::Mouse(mouse),
                Some(Ok(CrosstermEvent::Resize(width, height))) => Event::Resize(width, height),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err.into()),
                None => return Ok(()),
            },
        };
        if sender.send(event).is_err() {
            return Ok(());
        }
    }
}
