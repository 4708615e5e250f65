use anyhow::{Context, Result};
use ratatui::DefaultTerminal;
use std::io;

/// Owns the terminal for one picker session. Raw mode and the alternate
/// screen are released when the guard is dropped, on every exit path.
pub struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        let terminal = init_or_restore(ratatui::try_init, ratatui::restore)?;
        log::debug!("terminal acquired");
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
        log::debug!("terminal restored");
    }
}

/// Run `init`, and on failure run `restore` before returning the error.
/// Initialisation can enable raw mode and then fail part way, before any
/// guard exists to undo it.
fn init_or_restore<T>(
    init: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> Result<T> {
    match init() {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            restore();
            Err(e).context("failed to initialise terminal")
        }
    }
}
