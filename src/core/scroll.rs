//! Vertical scroll position in the message log.
//!
//! `offset` counts how many of the newest messages are scrolled past;
//! 0 means the newest message sits at the bottom of the pane.

use crate::core::input::Edit;

/// Messages moved per PageUp/PageDown unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolled(&self) -> bool {
        self.offset > 0
    }

    /// Scroll toward older messages by up to `step`, stopping at the oldest.
    pub fn up(&mut self, step: usize, message_count: usize) -> Edit {
        let oldest = message_count.saturating_sub(1);
        if self.offset >= oldest {
            return Edit::Boundary;
        }
        self.offset = (self.offset + step).min(oldest);
        Edit::Applied
    }

    /// Scroll toward newer messages by up to `step`, stopping at the newest.
    pub fn down(&mut self, step: usize) -> Edit {
        if self.offset == 0 {
            return Edit::Boundary;
        }
        self.offset = self.offset.saturating_sub(step);
        Edit::Applied
    }

    /// Jump back to the newest message.
    pub fn home(&mut self) {
        self.offset = 0;
    }

    /// Keep the same messages pinned on screen when a new one arrives
    /// while scrolled up. At the bottom the view follows the log.
    pub fn on_message_added(&mut self) {
        if self.offset != 0 {
            self.offset += 1;
        }
    }
}
