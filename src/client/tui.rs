use std::{io, panic};

use color_eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;

pub type CrosstermTerminal =
    ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stderr>>;

use crate::client::{app::App, event::EventHandler, ui};

/// Representation of terminal user interface.
/// Responsible for setting up the terminal with mouse capture,
/// feeding input events and drawing the board.
pub struct Tui {
    terminal: CrosstermTerminal,
    pub events: EventHandler,
}

impl Tui {
    /// Creates a new [`Tui`] drawing to stderr.
    pub fn new() -> Result<Self> {
        info!("Initializing ratatui terminal");
        let backend = ratatui::backend::CrosstermBackend::new(io::stderr());
        let terminal = ratatui::Terminal::new(backend)?;
        Ok(Self {
            terminal,
            events: EventHandler::new(),
        })
    }

    /// Initializes the terminal interface
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;

        // Restore the terminal before the panic report is printed
        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            if let Err(e) = Self::reset() {
                eprintln!("failed to reset the terminal: {e}");
            }
            panic_hook(panic_info);
        }));

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Exits the terminal interface.
    pub fn exit(&mut self) -> Result<()> {
        Self::reset()?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Resets the terminal interface.
    ///
    /// Also used by the panic hook to revert terminal properties.
    pub fn reset() -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }

    /// [`Draw`] the board by [`rendering`] the app state.
    ///
    /// [`Draw`]: ratatui::Terminal::draw
    /// [`rendering`]: crate::client::ui::render
    pub fn draw(&mut self, app: &mut App) -> Result<()> {
        self.terminal.draw(|frame| ui::render(app, frame))?;
        Ok(())
    }
}
