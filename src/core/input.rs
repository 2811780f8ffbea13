//! # Input Line State
//!
//! The in-progress line the user is typing, plus a horizontal scroll window
//! so lines longer than the frame stay editable.
//!
//! ```text
//! buffer:   h e l l o   w o r l d
//!                 ^ window_offset = 4
//! visible:       [o   w o r]          width = 5
//!                     ^ cursor = 2  →  logical position 6
//! ```
//!
//! Invariant: `cursor + window_offset <= buffer.len()` and `cursor <= width`.
//! Every operation takes the *current* width, since the terminal may have been
//! resized since the last keystroke. Only printable ASCII is accepted, so byte
//! indices and character indices coincide.

/// Result of an edit or scroll command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// State changed.
    Applied,
    /// Already at a boundary; nothing changed and the caller should ring the bell.
    Boundary,
}

/// Whether `ch` is accepted as text input (printable ASCII, 32..=126).
pub fn is_printable(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub buffer: String,
    /// Screen column of the cursor inside the input line, `0..=width`.
    pub cursor: usize,
    /// Index of the first visible buffer character.
    pub window_offset: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index into `buffer` where the next character is inserted.
    pub fn logical_position(&self) -> usize {
        self.cursor + self.window_offset
    }

    /// True when the window has scrolled away from the start of the buffer.
    pub fn scrolled_right(&self) -> bool {
        self.window_offset > 0
    }

    /// True when buffer content exists beyond the right edge of the window.
    pub fn has_more_right(&self, width: usize) -> bool {
        self.window_offset + width < self.buffer.len()
    }

    /// Insert a printable character at the cursor. Returns `Boundary` for
    /// characters outside the printable range, which are left to the caller.
    pub fn insert(&mut self, ch: char, width: usize) -> Edit {
        if !is_printable(ch) {
            return Edit::Boundary;
        }
        self.buffer.insert(self.logical_position(), ch);
        if self.cursor < width {
            self.cursor += 1;
        } else {
            // Typing at the right edge scrolls the text under a pinned cursor
            self.window_offset += 1;
        }
        Edit::Applied
    }

    pub fn move_left(&mut self) -> Edit {
        if self.logical_position() == 0 {
            return Edit::Boundary;
        }
        if self.cursor == 0 {
            self.window_offset -= 1;
        } else {
            self.cursor -= 1;
        }
        Edit::Applied
    }

    pub fn move_right(&mut self, width: usize) -> Edit {
        if self.logical_position() == self.buffer.len() {
            return Edit::Boundary;
        }
        if self.cursor >= width {
            self.window_offset += 1;
        } else {
            self.cursor += 1;
        }
        Edit::Applied
    }

    /// Remove the character before the cursor.
    ///
    /// While scrolled right with the window reaching the buffer end, the
    /// window shrinks instead of the cursor moving, keeping the text
    /// right-aligned. At column zero the window scrolls left as well.
    pub fn backspace(&mut self, width: usize) -> Edit {
        let pos = self.logical_position();
        if pos == 0 {
            return Edit::Boundary;
        }
        let right_aligned = self.window_offset > 0 && self.window_offset + width >= self.buffer.len();
        self.buffer.remove(pos - 1);
        if right_aligned || self.cursor == 0 {
            self.window_offset -= 1;
        } else {
            self.cursor -= 1;
        }
        Edit::Applied
    }

    /// Remove the character under the cursor. The logical position is kept;
    /// when right-aligned, the text shifts right under the cursor.
    pub fn delete(&mut self, width: usize) -> Edit {
        let pos = self.logical_position();
        if pos == self.buffer.len() {
            return Edit::Boundary;
        }
        let right_aligned = self.window_offset > 0 && self.window_offset + width >= self.buffer.len();
        self.buffer.remove(pos);
        if right_aligned {
            self.window_offset -= 1;
            self.cursor += 1;
        }
        Edit::Applied
    }

    /// Take the buffer and reset to an empty line.
    pub fn submit(&mut self) -> String {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.window_offset = 0;
        text
    }

    /// Re-clamp cursor and window against a (possibly changed) width.
    ///
    /// Run before every keystroke and before every draw. The logical
    /// position is preserved in every branch.
    pub fn refresh_geometry(&mut self, width: usize) {
        let len = self.buffer.len();
        if width > len {
            // Everything fits: no horizontal scroll needed
            self.cursor += self.window_offset;
            self.window_offset = 0;
        } else if width + self.window_offset > len {
            // Window widened past the buffer end: pull it back left
            let shift = width + self.window_offset - len;
            self.window_offset -= shift;
            self.cursor += shift;
        }

        if self.cursor > width {
            self.window_offset += self.cursor - width;
            self.cursor = width;
        }

        debug_assert!(self.logical_position() <= self.buffer.len());
    }

    /// The slice of the buffer shown in a window of `width` columns.
    pub fn visible(&self, width: usize) -> &str {
        let start = self.window_offset.min(self.buffer.len());
        let end = (start + width).min(self.buffer.len());
        &self.buffer[start..end]
    }
}
