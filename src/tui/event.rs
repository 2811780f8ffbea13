use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key events the interface understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A character typed without Ctrl/Alt. Only printable ASCII is inserted;
    /// the rest is ignored.
    Char(char),
    Enter,
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    Backspace,
    Delete,
    Escape,
    /// The terminal was resized. Handled like an unknown key: no edit, just a redraw.
    Resize,
    /// Anything else the terminal reported.
    Other,
}

/// Translate a crossterm event into a `Key`.
///
/// Returns `None` for events that should not wake the dispatcher at all
/// (key releases reported by enhanced keyboard protocols, focus changes,
/// mouse and paste events).
pub fn classify(event: &Event) -> Option<Key> {
    match event {
        Event::Key(key_event) => {
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            classify_key(key_event)
        }
        Event::Resize(columns, rows) => {
            log::debug!("Terminal resized to {}x{}", columns, rows);
            Some(Key::Resize)
        }
        _ => None,
    }
}

fn classify_key(key_event: &KeyEvent) -> Option<Key> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    let key = match key_event.code {
        KeyCode::Char(c) if !key_event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Key::Char(c)
        }
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    };
    Some(key)
}
