use std::time::Instant;

use color_eyre::Result;
use log::{debug, info};

use super::action::GameAction;
use super::event::Event;
use super::focus::{Focus, RowLengths};
use super::hit_map::HitMap;
use super::input_handler::{InputEvent, InputHandler};
use super::selection::Gesture;
use super::server_listener::ServerListener;
use super::session::Session;
use super::tui::Tui;
use crate::config::ClientConfig;
use crate::net::{ApiClient, Dispatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Running,
    Quitting,
}

/// The terminal application
pub struct App {
    /// Game state: snapshot, selection and log.
    pub(crate) session: Session,
    /// Keyboard cursor over the board.
    pub(crate) focus: Focus,
    /// Click regions of the last drawn frame.
    pub(crate) hit_map: HitMap,
    pub(crate) config: ClientConfig,

    dispatcher: Dispatcher,
    server: ServerListener,
    last_fetch: Instant,

    /// The state of the application.
    mode: Mode,
}

impl App {
    /// Constructs a new instance of [`App`] and starts its network runtime.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api = ApiClient::new(&config.server_url, config.http_timeout)?;
        let (dispatcher, replies) = Dispatcher::launch(api)?;

        Ok(Self {
            session: Session::new(),
            focus: Focus::default(),
            hit_map: HitMap::new(),
            config,
            dispatcher,
            server: ServerListener::from(replies),
            last_fetch: Instant::now(),
            mode: Mode::Running,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting clientside application");

        let mut tui = Tui::new()?;
        tui.enter()?;

        self.refresh();

        info!("Entering main loop");
        let result = self.main_loop(&mut tui);

        // exit the user interface even if the loop failed
        info!("Tearing down user interface");
        tui.exit()?;

        result
    }

    fn main_loop(&mut self, tui: &mut Tui) -> Result<()> {
        while self.running() {
            // draw to screen
            self.clamp_focus();
            tui.draw(self)?;

            // apply whatever the server answered since the last frame
            while let Some(reply) = self.server.update()? {
                self.session.apply(reply);
            }
            self.poll_if_due();

            if let Some(event) = tui.events.next(self.config.ui.tick_rate)? {
                self.handle_event(event);
            }
        }
        Ok(())
    }

    pub fn running(&self) -> bool {
        self.mode != Mode::Quitting
    }

    pub fn quit(&mut self) {
        info!("Quit requested");
        self.mode = Mode::Quitting;
    }

    fn handle_event(&mut self, event: Event) {
        let Some(input) = InputHandler::translate(event, &self.hit_map) else {
            return;
        };
        match input {
            InputEvent::Quit => self.quit(),
            InputEvent::Refresh => self.refresh(),
            InputEvent::MoveFocus(movement) => {
                if let Some(snapshot) = self.session.snapshot() {
                    let lengths = RowLengths::of(snapshot, self.session.selection());
                    self.focus.apply(movement, lengths);
                }
            }
            // both point at what the last frame showed
            InputEvent::ActivateFocus => self.frame_gesture(self.focus.gesture()),
            InputEvent::Click(gesture) => self.frame_gesture(gesture),
            InputEvent::Gesture(gesture) => {
                let action = self.session.handle(gesture);
                self.dispatch(action);
            }
        }
    }

    fn frame_gesture(&mut self, gesture: Gesture) {
        let action = self
            .session
            .handle_in_frame(gesture, self.hit_map.generation());
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: Option<GameAction>) {
        if let Some(action) = action {
            let request = self.dispatcher.send_action(action);
            debug!("Sent '{action}' as request #{request}");
        }
    }

    /// Requests a fresh snapshot unless an action is awaiting its answer.
    fn refresh(&mut self) {
        if let Some(pending) = self.session.in_flight() {
            debug!("Skipping refresh while '{pending}' is in flight");
            return;
        }
        self.last_fetch = Instant::now();
        let request = self.dispatcher.fetch_game();
        debug!("Fetching game state as request #{request}");
    }

    fn poll_if_due(&mut self) {
        let Some(interval) = self.config.poll_interval else {
            return;
        };
        if self.last_fetch.elapsed() >= interval {
            self.refresh();
        }
    }

    fn clamp_focus(&mut self) {
        if let Some(snapshot) = self.session.snapshot() {
            self.focus
                .clamp(RowLengths::of(snapshot, self.session.selection()));
        }
    }
}
