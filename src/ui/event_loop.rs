use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ui::App;

/// Everything the navigation state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Tick,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Quit,
    Cancelled,
}

/// Blocking source of events, one at a time.
pub trait EventSource {
    fn next_event(&mut self) -> Result<AppEvent>;
}

/// Terminal events from crossterm, plus ticks and host cancellation.
pub struct CrosstermEvents {
    tick_rate: Duration,
    cancel: watch::Receiver<bool>,
}

impl CrosstermEvents {
    pub fn new(tick_rate: Duration, cancel: watch::Receiver<bool>) -> Self {
        Self { tick_rate, cancel }
    }
}

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<AppEvent> {
        loop {
            if *self.cancel.borrow() {
                return Ok(AppEvent::Cancel);
            }
            if !event::poll(self.tick_rate)? {
                return Ok(AppEvent::Tick);
            }
            match event::read()? {
                // Only key presses; release and repeat are dropped
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(AppEvent::Key(key));
                }
                Event::Resize(width, height) => return Ok(AppEvent::Resize { width, height }),
                _ => {}
            }
        }
    }
}

/// Drive `app` until it quits or the host cancels.
///
/// Each event is applied and followed by a full render before the next one
/// is read. Cancellation ends the loop without rendering again.
pub fn run_loop<E, R>(app: &mut App, events: &mut E, mut render: R) -> Result<LoopExit>
where
    E: EventSource,
    R: FnMut(&App) -> Result<()>,
{
    render(app)?;
    loop {
        let event = events.next_event()?;
        if event == AppEvent::Cancel {
            app.terminate();
            return Ok(LoopExit::Cancelled);
        }
        app.handle_event(event);
        render(app)?;
        if app.should_quit {
            return Ok(LoopExit::Quit);
        }
    }
}

/// Flip `cancel` to true on Ctrl-C, SIGTERM or SIGHUP. The task never
/// touches navigation state.
pub fn spawn_cancel_watcher(cancel: watch::Sender<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("cancellation requested by host");
        let _ = cancel.send(true);
    })
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (Ok(mut term), Ok(mut hup)) = (
        signal(SignalKind::terminate()),
        signal(SignalKind::hangup()),
    ) else {
        let _ = tokio::signal::ctrl_c().await;
        return;
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = term.recv() => {}
        _ = hup.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
