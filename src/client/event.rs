use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};
use color_eyre::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use log::{debug, error};

/// Terminal client events.
#[derive(Clone, Copy, Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Mouse click/scroll
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Terminal event handler
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::Receiver<Event>,
    /// Thread polls crossterm for user input and sends them along the channel
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    pub fn new() -> Self {
        let poll_timeout = Duration::from_millis(20);
        let (sender, receiver) = mpsc::channel();

        let handler = thread::spawn(move || loop {
            let ready = match event::poll(poll_timeout) {
                Ok(ready) => ready,
                Err(e) => {
                    error!("Unable to poll terminal events: {e}");
                    break;
                }
            };
            if !ready {
                continue;
            }
            let event = match event::read() {
                Ok(CrosstermEvent::Key(e)) if e.kind == KeyEventKind::Press => Event::Key(e),
                Ok(CrosstermEvent::Mouse(e)) => Event::Mouse(e),
                Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                // key release, focus and paste events
                Ok(_) => continue,
                Err(e) => {
                    error!("Unable to read terminal event: {e}");
                    break;
                }
            };
            if sender.send(event).is_err() {
                debug!("Event receiver closed, stopping input thread");
                break;
            }
        });

        Self { receiver, handler }
    }

    /// Waits up to `timeout` for the next event.
    pub fn next(&self, timeout: Duration) -> Result<Option<Event>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
