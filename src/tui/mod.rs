//! # TUI Adapter
//!
//! The terminal-facing layer: key classification, frame formatting, the
//! terminal backend and the [`Interface`] engine that ties them to the core
//! state.
//!
//! This is the only module that knows about crossterm, and only
//! [`backend`] and [`event`] touch it directly.
//!
//! ## Redraw Strategy
//!
//! There is no frame timer. The screen is redrawn after every key (including
//! keys that change nothing, and terminal resizes) and after every
//! [`Interface::add_message`]. Each redraw writes every row with absolute
//! positioning and flushes once, so frames never interleave.
//!
//! A `SteadyBar` cursor style is used instead of a blinking cursor because
//! moving the cursor on every redraw resets the terminal's blink timer,
//! making blinking cursors appear erratic.

pub mod backend;
pub mod event;
pub mod frame;
pub mod interface;
pub mod session;

pub use backend::{Backend, CrosstermBackend};
pub use event::Key;
pub use interface::{Handler, Interface, InterfaceError, InterfaceOptions};
