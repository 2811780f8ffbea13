//! # Viewport Geometry
//!
//! Derived from the terminal size on every edit and every draw. Never cached
//! across operations, so a resize between two keystrokes is picked up by the
//! next one.
//!
//! ```text
//! ┌──────┬──────────────────┐   top border
//! │sender│body              │   usable_height rows
//! │      │                  │
//! ┝━━━━━━┷━━━━━━━━━━━━━━━━━━┥   separator
//! │input                    │   input line
//! └─────────────────────────┘   bottom border
//!  ^^^^^^ sender_width
//!        ^ divider
//!         ^^^^^^^^^^^^^^^^^^ usable_width
//!  ^^^^^^^^^^^^^^^^^^^^^^^^^ frame_width (= input_width)
//! ```

/// Rows consumed by the top border, separator, input line and bottom border.
pub const FRAME_OVERHEAD_ROWS: u16 = 4;
/// Columns consumed by the left and right borders.
pub const BORDER_COLUMNS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Terminal columns.
    pub columns: u16,
    /// Terminal rows.
    pub rows: u16,
    /// Interior width between the left and right borders.
    pub frame_width: usize,
    /// Configured sender column width; 0 disables the column.
    pub sender_width: usize,
    /// Width of the message body column.
    pub usable_width: usize,
    /// Rows available to the message pane.
    pub usable_height: usize,
}

impl Geometry {
    /// Measure the layout for a terminal of `columns` x `rows`.
    ///
    /// Below one usable column or row the layout is degenerate; the body
    /// width is floored at 1 so wrapping stays well-defined.
    pub fn measure(columns: u16, rows: u16, sender_width: usize) -> Self {
        let frame_width = usize::from(columns.saturating_sub(BORDER_COLUMNS));
        let sender_area = if sender_width == 0 { 0 } else { sender_width + 1 };
        Self {
            columns,
            rows,
            frame_width,
            sender_width,
            usable_width: frame_width.saturating_sub(sender_area).max(1),
            usable_height: usize::from(rows.saturating_sub(FRAME_OVERHEAD_ROWS)),
        }
    }

    /// Width of the input line. The input spans the whole frame interior;
    /// the sender column does not continue below the separator.
    pub fn input_width(&self) -> usize {
        self.frame_width
    }

    /// Terminal row of the input line (0-based).
    pub fn input_row(&self) -> u16 {
        self.rows.saturating_sub(2)
    }
}
