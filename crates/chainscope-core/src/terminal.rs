#![forbid(unsafe_code)]

//! Terminal session lifecycle.
//!
//! [`TerminalSession`] owns the transition into raw mode, the alternate
//! screen, and mouse capture, and restores the terminal when dropped so a
//! panicking or erroring program never leaves the shell in raw mode.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event as cte;
use crossterm::{cursor, execute, terminal};

use crate::event::Event;

/// Options for entering a terminal session.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Capture mouse motion/click events.
    pub mouse: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { mouse: true }
    }
}

/// RAII guard around the raw-mode alternate-screen terminal.
#[derive(Debug)]
pub struct TerminalSession {
    mouse: bool,
    active: bool,
}

impl TerminalSession {
    /// Enter raw mode, switch to the alternate screen, hide the cursor,
    /// and (optionally) enable mouse capture.
    pub fn enter(options: SessionOptions) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        if options.mouse {
            execute!(out, cte::EnableMouseCapture)?;
        }
        Ok(Self {
            mouse: options.mouse,
            active: true,
        })
    }

    /// Current terminal size in columns/rows.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for the next input event.
    ///
    /// Returns `Ok(None)` when the timeout elapses or the event is one the
    /// explorer ignores.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<Option<Event>> {
        if cte::poll(timeout)? {
            Ok(Event::from_crossterm(cte::read()?))
        } else {
            Ok(None)
        }
    }

    /// Restore the terminal explicitly. Also runs on drop.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut out = io::stdout();
        if self.mouse {
            execute!(out, cte::DisableMouseCapture)?;
        }
        execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        out.flush()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::SessionOptions;

    #[test]
    fn default_options_capture_mouse() {
        assert!(SessionOptions::default().mouse);
    }
}
