use std::{io, panic};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::event::EventHandler;

/// Terminal user interface.
///
/// Sets up the terminal on [`Tui::init`] and restores it on [`Tui::deinit`]
/// or on panic.
pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<io::Stdout>>,
    pub events: EventHandler,
}

impl Tui {
    pub fn new(terminal: Terminal<CrosstermBackend<io::Stdout>>, events: EventHandler) -> Self {
        Self { terminal, events }
    }

    /// Enters raw mode and the alternate screen, and captures the mouse.
    pub fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;

        // Restore the terminal before the panic message is printed.
        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if let Err(err) = Self::reset() {
                eprintln!("failed to reset the terminal: {err}");
            }
            panic_hook(info);
        }));

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restores the terminal.
    pub fn deinit(&mut self) -> Result<()> {
        Self::reset()?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn reset() -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        Ok(())
    }
}
