//! Raw-mode terminal session that puts the terminal back on drop.

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while some guard owns the terminal, so the panic hook only restores
/// what was actually changed
static TERMINAL_TAKEN: AtomicBool = AtomicBool::new(false);

/// RAII guard over raw mode and the alternate screen.
///
/// Restores the terminal on early `?` returns and normal scope exit; the
/// panic hook covers unwinding.
pub struct TerminalGuard {
    active: AtomicBool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        TERMINAL_TAKEN.store(true, Ordering::SeqCst);
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("Failed to enter alternate screen")?;
        Ok(Self {
            active: AtomicBool::new(true),
        })
    }

    /// Ratatui terminal drawing to stdout
    pub fn terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Undo raw mode and the alternate screen; safe to call more than once
    pub fn cleanup() {
        if !TERMINAL_TAKEN.swap(false, Ordering::SeqCst) {
            return;
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            Self::cleanup();
        }
    }
}

/// Restore the terminal before the default hook prints the panic
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        TerminalGuard::cleanup();
        original_hook(panic_info);
    }));
}
