//! A boxed terminal widget: a scrolling message log above an editable
//! input line.

pub mod core;
pub mod demo;
pub mod tui;

#[cfg(test)]
pub mod test_support;
