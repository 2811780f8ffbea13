//! A single entry in the message log.

/// Immutable log entry. An empty `sender` means the message is unattributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub body: String,
    pub sender: String,
}

impl Message {
    pub fn new(body: impl Into<String>, sender: Option<&str>) -> Self {
        Self {
            body: body.into(),
            sender: sender.unwrap_or_default().to_string(),
        }
    }

    /// Number of pane rows this message occupies when wrapped at `width` columns.
    /// Never less than one, so an empty body still takes a blank row.
    pub fn line_count(&self, width: usize) -> usize {
        debug_assert!(width > 0, "wrap width must be at least 1");
        self.body.chars().count().div_ceil(width).max(1)
    }
}

/// Split `body` into consecutive chunks of at most `width` characters.
///
/// An empty body yields a single empty chunk.
pub fn wrap_segments(body: &str, width: usize) -> Vec<&str> {
    debug_assert!(width > 0, "wrap width must be at least 1");
    if body.is_empty() {
        return vec![""];
    }

    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars_in_segment = 0;
    for (idx, _) in body.char_indices() {
        if chars_in_segment == width {
            segments.push(&body[start..idx]);
            start = idx;
            chars_in_segment = 0;
        }
        chars_in_segment += 1;
    }
    segments.push(&body[start..]);
    segments
}
