//! Terminal management with RAII cleanup.
//!
//! # Example
//!
//! ```no_run
//! use stepgate::terminal::TerminalManager;
//!
//! fn main() -> color_eyre::Result<()> {
//!     let mut term_manager = TerminalManager::new()?;
//!     let terminal = term_manager.terminal();
//!     // ... draw ...
//!     Ok(())
//! }
//! ```

mod enhancements;
mod panic;
mod setup;

pub use enhancements::{
    enable_keyboard_enhancements, pop_keyboard_enhancements, push_keyboard_enhancements,
};
pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Restores the terminal when dropped.
pub struct TerminalGuard {
    cleaned_up: bool,
    /// Keyboard enhancement flags were pushed and must be popped
    enhanced: bool,
}

impl TerminalGuard {
    fn new(enhanced: bool) -> Self {
        Self {
            cleaned_up: false,
            enhanced,
        }
    }

    /// Restore the terminal. Subsequent calls are no-ops.
    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;

        let mut stdout = io::stdout();
        if self.enhanced {
            pop_keyboard_enhancements(&mut stdout);
        }
        leave_tui_mode(&mut stdout);
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Owns the ratatui terminal for the lifetime of the UI.
///
/// Setup happens in [`TerminalManager::new`]; teardown happens on drop, or
/// earlier through [`TerminalManager::restore`].
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: TerminalGuard,
}

impl TerminalManager {
    /// Raw mode, alternate screen, bracketed paste, mouse capture and, where
    /// supported, keyboard enhancement flags.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(e) = enter_tui_mode(&mut stdout) {
            leave_tui_mode(&mut stdout);
            return Err(e.into());
        }
        let enhanced = enable_keyboard_enhancements(&mut stdout);
        let guard = TerminalGuard::new(enhanced);

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Whether `Ctrl+Enter` can be told apart from Enter.
    pub fn keyboard_enhanced(&self) -> bool {
        self.guard.enhanced
    }

    /// Restore the terminal now instead of on drop.
    pub fn restore(&mut self) {
        self.guard.cleanup();
    }
}
