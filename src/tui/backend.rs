//! # Terminal Backend
//!
//! The single seam between the interface and a real terminal. The engine only
//! ever holds an `Arc<dyn Backend>`, so tests can swap in a scripted terminal.

use std::io::{self, Write, stdout};

use crossterm::cursor::{MoveTo, SetCursorStyle};
use crossterm::event;
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use log::info;

use crate::tui::event::{Key, classify};
use crate::tui::frame::Frame;

const BELL: &str = "\x07";

/// Everything the interface needs from a terminal.
///
/// Implementations must be callable from the key-reader thread and from any
/// thread that posts messages at the same time. The interface serializes
/// `draw` and `bell` itself; `read_key` runs concurrently with both.
pub trait Backend: Send + Sync {
    /// Current size as (columns, rows).
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Block until the next key the dispatcher should see.
    fn read_key(&self) -> io::Result<Key>;

    /// Write a whole frame and park the cursor.
    fn draw(&self, frame: &Frame) -> io::Result<()>;

    /// Audible "nothing happened" signal.
    fn bell(&self) -> io::Result<()>;

    /// Switch to the alternate screen and prepare for key-by-key input.
    fn enter(&self) -> io::Result<()>;

    /// Undo everything `enter` did.
    fn leave(&self) -> io::Result<()>;
}

/// Backend for the process's own terminal, built on crossterm.
#[derive(Debug, Default)]
pub struct CrosstermBackend;

impl CrosstermBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for CrosstermBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn read_key(&self) -> io::Result<Key> {
        loop {
            if let Some(key) = classify(&event::read()?) {
                return Ok(key);
            }
        }
    }

    fn draw(&self, frame: &Frame) -> io::Result<()> {
        let mut out = stdout().lock();
        for (row, line) in frame.lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(out, MoveTo(0, row), Print(line))?;
        }
        let (column, row) = frame.cursor;
        queue!(out, MoveTo(column, row))?;
        out.flush()
    }

    fn bell(&self) -> io::Result<()> {
        let mut out = stdout().lock();
        out.write_all(BELL.as_bytes())?;
        out.flush()
    }

    fn enter(&self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(
            stdout(),
            EnterAlternateScreen,
            Clear(ClearType::All),
            SetCursorStyle::SteadyBar,
        )?;
        info!("Terminal modes enabled (raw mode, alternate screen, steady bar cursor)");
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        let result = execute!(
            stdout(),
            Clear(ClearType::All),
            SetCursorStyle::DefaultUserShape,
            LeaveAlternateScreen,
        );
        // Raw mode must be restored even if the escape sequences failed
        disable_raw_mode()?;
        info!("Terminal restored to main screen");
        result
    }
}
