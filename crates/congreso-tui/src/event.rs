//! Input pump for the preview shell.
//!
//! A background task multiplexes three sources onto one unbounded channel:
//! crossterm's async [`EventStream`], a slow tick that keeps the countdown
//! moving, and a fast render beat. The app loop only ever awaits
//! [`EventReader::next`].

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// What the app loop reacts to.
#[derive(Debug)]
pub enum Event {
    /// Key press. Repeats and releases are filtered out.
    Key(KeyEvent),
    /// Clicks and pointer motion; motion feeds carousel hover.
    Mouse(MouseEvent),
    /// New terminal size in (cols, rows).
    Resize(u16, u16),
    FocusGained,
    /// Slow beat for time-driven content such as the countdown.
    Tick,
    /// Redraw request.
    Render,
}

/// Map a raw crossterm event to an app event, dropping what the shell
/// does not use (paste, focus lost, key release).
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        CrosstermEvent::FocusGained => Some(Event::FocusGained),
        _ => None,
    }
}

fn beat(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn pump(
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
    tick_rate: Duration,
    render_rate: Duration,
) {
    let mut input = EventStream::new();
    let mut tick = beat(tick_rate);
    let mut render = beat(render_rate);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => return,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            raw = input.next() => match raw {
                Some(Ok(raw)) => match translate(raw) {
                    Some(event) => event,
                    None => continue,
                },
                // Broken stdin: nothing more will arrive.
                Some(Err(_)) | None => return,
            },
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

/// Owner of the pump task. Dropping it stops the task.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(tx, cancel.clone(), tick_rate, render_rate));
        Self { rx, cancel }
    }

    /// Next event, or `None` once the pump has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    use super::*;

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn only_key_presses_pass() {
        assert!(matches!(translate(key(KeyEventKind::Press)), Some(Event::Key(_))));
        assert!(translate(key(KeyEventKind::Release)).is_none());
        assert!(translate(key(KeyEventKind::Repeat)).is_none());
    }

    #[test]
    fn focus_and_resize_are_forwarded() {
        assert!(matches!(
            translate(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        ));
        assert!(matches!(
            translate(CrosstermEvent::FocusGained),
            Some(Event::FocusGained)
        ));
        assert!(translate(CrosstermEvent::FocusLost).is_none());
    }
}
