//! # Message Layout Engine
//!
//! Turns the tail of the message log into exactly the rows that fit the
//! message pane.
//!
//! ## Algorithm
//!
//! Messages arrive newest first. We walk toward older ones, stacking each
//! message and summing its wrapped line count, until the pane is full or the
//! log runs out. Popping the stack then yields oldest-to-newest order.
//!
//! If the oldest stacked message overflows the pane, its leading lines are
//! cut so the pane's top edge slices through it:
//!
//! ```text
//! W = 10, H = 2, body = 25 chars  →  3 wrapped lines, 1 excess
//!
//!   aaaaaaaaaa   <- cut
//! ┌────────────┐
//! │aaaaaaaaaa  │
//! │aaaaa       │
//! ```
//!
//! The pane is never padded here; callers fill the top with blank rows when
//! fewer than `H` lines come back.

use crate::core::message::{Message, wrap_segments};

/// One row of the message pane, before framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLine<'a> {
    /// Sender label, only set on the first wrapped line of a message.
    pub sender: &'a str,
    pub body: &'a str,
}

/// Lay out `newest_first` into at most `height` rows of `width` columns.
///
/// `width` must be at least 1.
pub fn layout<'a, I>(newest_first: I, width: usize, height: usize) -> Vec<PaneLine<'a>>
where
    I: IntoIterator<Item = &'a Message>,
{
    debug_assert!(width > 0, "layout width must be at least 1");

    let mut stack: Vec<&Message> = Vec::new();
    let mut total = 0;
    for message in newest_first {
        if total >= height {
            break;
        }
        total += message.line_count(width);
        stack.push(message);
    }

    let mut lines = Vec::with_capacity(total.min(height));

    let excess = total.saturating_sub(height);
    if excess > 0
        && let Some(cut) = stack.pop()
    {
        lines.extend(
            wrap_segments(&cut.body, width)
                .into_iter()
                .skip(excess)
                .map(|body| PaneLine { sender: "", body }),
        );
    }

    while let Some(message) = stack.pop() {
        for (idx, body) in wrap_segments(&message.body, width).into_iter().enumerate() {
            let sender = if idx == 0 { message.sender.as_str() } else { "" };
            lines.push(PaneLine { sender, body });
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(body: &str, sender: &str) -> Message {
        Message::new(body, Some(sender))
    }

    /// Log in append order; layout consumes it newest first.
    fn run<'a>(log: &'a [Message], width: usize, height: usize) -> Vec<PaneLine<'a>> {
        layout(log.iter().rev(), width, height)
    }

    fn bodies<'a>(lines: &[PaneLine<'a>]) -> Vec<&'a str> {
        lines.iter().map(|l| l.body).collect()
    }

    #[test]
    fn short_messages_render_oldest_first() {
        let log = vec![msg("one", ""), msg("two", ""), msg("three", "")];
        let lines = run(&log, 10, 5);
        assert_eq!(bodies(&lines), vec!["one", "two", "three"]);
    }

    #[test]
    fn only_newest_that_fit_are_kept() {
        let log: Vec<Message> = (1..=6).map(|i| msg(&format!("m{i}"), "")).collect();
        let lines = run(&log, 10, 3);
        assert_eq!(bodies(&lines), vec!["m4", "m5", "m6"]);
    }

    #[test]
    fn message_filling_pane_exactly_is_not_cut() {
        let log = vec![msg(&"a".repeat(25), "")];
        let lines = run(&log, 10, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].body, "a".repeat(10));
        assert_eq!(lines[1].body, "a".repeat(10));
        // Wrapping starts at the first character, so the 25 mod 10 overhang
        // sits on the last row, never the first
        assert_eq!(lines[2].body, "a".repeat(5));
    }

    #[test]
    fn oldest_message_is_cut_at_top_edge() {
        let log = vec![msg("0123456789abcdefghijKLMNO", "bob")];
        let lines = run(&log, 10, 2);
        assert_eq!(bodies(&lines), vec!["abcdefghij", "KLMNO"]);
        assert!(lines.iter().all(|l| l.sender.is_empty()));
    }

    #[test]
    fn cut_message_sits_above_newer_ones() {
        let log = vec![msg(&"x".repeat(30), "old"), msg("new", "me")];
        let lines = run(&log, 10, 3);
        assert_eq!(bodies(&lines), vec!["xxxxxxxxxx", "xxxxxxxxxx", "new"]);
        assert_eq!(lines[2].sender, "me");
    }

    #[test]
    fn sender_only_on_first_wrapped_line() {
        let log = vec![msg("abcdefghijkl", "ann")];
        let lines = run(&log, 5, 10);
        assert_eq!(bodies(&lines), vec!["abcde", "fghij", "kl"]);
        assert_eq!(lines[0].sender, "ann");
        assert_eq!(lines[1].sender, "");
        assert_eq!(lines[2].sender, "");
    }

    #[test]
    fn empty_body_takes_one_blank_line() {
        let log = vec![msg("", "sys"), msg("hi", "")];
        let lines = run(&log, 10, 5);
        assert_eq!(bodies(&lines), vec!["", "hi"]);
        assert_eq!(lines[0].sender, "sys");
    }

    #[test]
    fn short_log_returns_fewer_lines_than_height() {
        let log = vec![msg("only", "")];
        assert_eq!(run(&log, 10, 8).len(), 1);
        assert!(run(&[], 10, 8).is_empty());
    }

    #[test]
    fn zero_height_yields_nothing() {
        let log = vec![msg("hello", "")];
        assert!(run(&log, 10, 0).is_empty());
    }

    #[test]
    fn layout_is_idempotent() {
        let log = vec![msg(&"q".repeat(17), "a"), msg("short", "b"), msg(&"z".repeat(42), "")];
        let first = run(&log, 7, 6);
        let second = run(&log, 7, 6);
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }
}
