//! # Frame Renderer
//!
//! Stateless formatting of every row of the box-drawn frame. Nothing here
//! touches the terminal; the output is a [`Frame`] the backend writes in one go.
//!
//! ```text
//! ┌────┬───────────┐   top_line
//! │    │           │   clear_line (padding above short logs)
//! │bob │hello      │   content_line
//! ┝━━━━┷━━━━━━━━━━━┥   separator_line (caps become ⮜ ⮞, fill becomes ╍)
//! │typed text      │   input_line
//! └────────────────┘   bottom_line
//! ```

use crate::core::geometry::Geometry;
use crate::core::input::InputState;
use crate::core::layout::PaneLine;

const VERTICAL: char = '│';
const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const TOP_DIVIDER: char = '┬';
const SEPARATOR_DIVIDER: char = '┷';
const LEFT_TEE: char = '┝';
const RIGHT_TEE: char = '┥';
const HORIZONTAL: char = '─';
const SEPARATOR: char = '━';
const SEPARATOR_SCROLLED: char = '╍';
const LEFT_ARROW: char = '⮜';
const RIGHT_ARROW: char = '⮞';
const ELLIPSIS: char = '…';

/// A fully composed screen: one string per terminal row, plus where the
/// cursor should rest afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    /// (column, row), 0-based.
    pub cursor: (u16, u16),
}

/// Which off-screen content the separator should advertise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollIndicators {
    /// Input window starts after the buffer start.
    pub input_left: bool,
    /// Input buffer continues past the right edge.
    pub input_right: bool,
    /// Message pane is scrolled away from the newest message.
    pub messages_up: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FrameRenderer {
    sender_width: usize,
}

impl FrameRenderer {
    pub fn new(sender_width: usize) -> Self {
        Self { sender_width }
    }

    fn has_sender_column(&self) -> bool {
        self.sender_width > 0
    }

    /// Character index of the sender/body divider within a full row.
    fn divider_index(&self) -> usize {
        self.sender_width + 1
    }

    /// A border row: `left` + `fill` x `frame_width` + `right`, with the
    /// divider glyph dropped in when a sender column exists.
    fn border_row(&self, left: char, fill: char, right: char, divider: Option<char>, frame_width: usize) -> String {
        let mut row: Vec<char> = std::iter::once(left)
            .chain(std::iter::repeat_n(fill, frame_width))
            .chain(std::iter::once(right))
            .collect();
        if let Some(glyph) = divider
            && self.has_sender_column()
            && self.divider_index() < row.len() - 1
        {
            row[self.divider_index()] = glyph;
        }
        row.into_iter().collect()
    }

    pub fn top_line(&self, frame_width: usize) -> String {
        self.border_row(TOP_LEFT, HORIZONTAL, TOP_RIGHT, Some(TOP_DIVIDER), frame_width)
    }

    pub fn bottom_line(&self, frame_width: usize) -> String {
        self.border_row(BOTTOM_LEFT, HORIZONTAL, BOTTOM_RIGHT, None, frame_width)
    }

    /// Blank framed row used to pad the pane above a short log.
    pub fn clear_line(&self, frame_width: usize) -> String {
        self.border_row(VERTICAL, ' ', VERTICAL, Some(VERTICAL), frame_width)
    }

    pub fn separator_line(&self, frame_width: usize, indicators: ScrollIndicators) -> String {
        let left = if indicators.input_left { LEFT_ARROW } else { LEFT_TEE };
        let right = if indicators.input_right { RIGHT_ARROW } else { RIGHT_TEE };
        let fill = if indicators.messages_up { SEPARATOR_SCROLLED } else { SEPARATOR };
        self.border_row(left, fill, right, Some(SEPARATOR_DIVIDER), frame_width)
    }

    /// A message row: sender column (if configured) and the body, each
    /// padded or cut to its column width.
    pub fn content_line(&self, sender: &str, body: &str, usable_width: usize) -> String {
        let mut row = String::new();
        row.push(VERTICAL);
        if self.has_sender_column() {
            row.push_str(&fit(&truncate(sender, self.sender_width), self.sender_width));
            row.push(VERTICAL);
        }
        row.push_str(&fit(body, usable_width));
        row.push(VERTICAL);
        row
    }

    /// The input row. It spans the whole frame; the sender column stops at the separator.
    pub fn input_line(&self, visible: &str, frame_width: usize) -> String {
        let mut row = String::new();
        row.push(VERTICAL);
        row.push_str(&fit(visible, frame_width));
        row.push(VERTICAL);
        row
    }

    /// Compose every row of the screen.
    ///
    /// `pane` holds at most `usable_height` laid-out lines; missing rows are
    /// padded at the top so the input line stays anchored to the bottom.
    pub fn compose(&self, geometry: &Geometry, pane: &[PaneLine<'_>], input: &InputState, messages_up: bool) -> Frame {
        let width = geometry.input_width();
        let mut lines = Vec::with_capacity(geometry.usable_height + 4);

        lines.push(self.top_line(geometry.frame_width));

        let missing = geometry.usable_height.saturating_sub(pane.len());
        lines.extend(std::iter::repeat_with(|| self.clear_line(geometry.frame_width)).take(missing));
        lines.extend(
            pane.iter()
                .take(geometry.usable_height)
                .map(|line| self.content_line(line.sender, line.body, geometry.usable_width)),
        );

        let indicators = ScrollIndicators {
            input_left: input.scrolled_right(),
            input_right: input.has_more_right(width),
            messages_up,
        };
        lines.push(self.separator_line(geometry.frame_width, indicators));
        lines.push(self.input_line(input.visible(width), geometry.frame_width));
        lines.push(self.bottom_line(geometry.frame_width));

        let column = u16::try_from(input.cursor + 1).unwrap_or(u16::MAX);
        Frame {
            lines,
            cursor: (column.min(geometry.columns.saturating_sub(1)), geometry.input_row()),
        }
    }
}

/// Shorten `value` to at most `max` characters, marking the cut with an ellipsis.
/// A one-character column keeps the first character without a marker.
pub fn truncate(value: &str, max: usize) -> String {
    let len = value.chars().count();
    if len <= max {
        return value.to_string();
    }
    if max <= 1 {
        return value.chars().take(max).collect();
    }
    let mut out: String = value.chars().take(max - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Pad with spaces or cut so the result is exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;

    fn width_of(line: &str) -> usize {
        line.chars().count()
    }

    #[test]
    fn borders_without_sender_column() {
        let r = FrameRenderer::new(0);
        assert_eq!(r.top_line(4), "┌────┐");
        assert_eq!(r.bottom_line(4), "└────┘");
        assert_eq!(r.clear_line(4), "│    │");
        assert_eq!(r.separator_line(4, ScrollIndicators::default()), "┝━━━━┥");
    }

    #[test]
    fn borders_with_sender_column_place_divider() {
        let r = FrameRenderer::new(3);
        assert_eq!(r.top_line(8), "┌───┬────┐");
        assert_eq!(r.clear_line(8), "│   │    │");
        assert_eq!(r.separator_line(8, ScrollIndicators::default()), "┝━━━┷━━━━┥");
        assert_eq!(r.bottom_line(8), "└────────┘");
    }

    #[test]
    fn separator_shows_scroll_arrows() {
        let r = FrameRenderer::new(0);
        let all = ScrollIndicators {
            input_left: true,
            input_right: true,
            messages_up: true,
        };
        assert_eq!(r.separator_line(3, all), "⮜╍╍╍⮞");
        let left_only = ScrollIndicators {
            input_left: true,
            ..Default::default()
        };
        assert_eq!(r.separator_line(3, left_only), "⮜━━━┥");
    }

    #[test]
    fn content_line_pads_and_truncates() {
        let r = FrameRenderer::new(4);
        assert_eq!(r.content_line("al", "hi", 5), "│al  │hi   │");
        assert_eq!(r.content_line("alexander", "hello world", 5), "│ale…│hello│");
        assert_eq!(FrameRenderer::new(0).content_line("ignored", "hi", 4), "│hi  │");
    }

    #[test]
    fn truncate_rules() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly", 7), "exactly");
        assert_eq!(truncate("toolong", 5), "tool…");
        assert_eq!(truncate("xyz", 1), "x");
        assert_eq!(truncate("", 1), "");
    }

    #[test]
    fn compose_pads_top_and_anchors_input() {
        let geometry = Geometry::measure(12, 8, 0);
        let log = [Message::new("hello", None)];
        let pane = crate::core::layout::layout(log.iter().rev(), geometry.usable_width, geometry.usable_height);
        let mut input = InputState::new();
        input.insert('x', geometry.input_width());

        let frame = FrameRenderer::new(0).compose(&geometry, &pane, &input, false);

        assert_eq!(frame.lines.len(), 8);
        assert!(frame.lines.iter().all(|l| width_of(l) == 12));
        assert_eq!(frame.lines[0], "┌──────────┐");
        assert_eq!(frame.lines[1], "│          │");
        assert_eq!(frame.lines[3], "│          │");
        assert_eq!(frame.lines[4], "│hello     │");
        assert_eq!(frame.lines[5], "┝━━━━━━━━━━┥");
        assert_eq!(frame.lines[6], "│x         │");
        assert_eq!(frame.lines[7], "└──────────┘");
        assert_eq!(frame.cursor, (2, 6));
    }

    #[test]
    fn compose_with_sender_column_keeps_row_widths() {
        let geometry = Geometry::measure(20, 6, 5);
        let log = [Message::new("a fairly long message body", Some("someone"))];
        let pane = crate::core::layout::layout(log.iter().rev(), geometry.usable_width, geometry.usable_height);
        let frame = FrameRenderer::new(5).compose(&geometry, &pane, &InputState::new(), true);

        assert!(frame.lines.iter().all(|l| width_of(l) == 20), "{:#?}", frame.lines);
        assert!(frame.lines[3].contains('╍'));
    }

    #[test]
    fn compose_shows_input_window() {
        let geometry = Geometry::measure(7, 5, 0);
        let mut input = InputState::new();
        for ch in "abcdefgh".chars() {
            input.insert(ch, geometry.input_width());
        }
        let frame = FrameRenderer::new(0).compose(&geometry, &[], &input, false);
        assert_eq!(frame.lines[2], "⮜━━━━━┥");
        assert_eq!(frame.lines[3], "│defgh│");
        assert_eq!(frame.cursor, (6, 3));
    }
}
