//! # Core Widget State
//!
//! Everything the widget knows, with no terminal I/O.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Message log entries  │
//!                    │  • Input line editing   │
//!                    │  • Scroll position      │
//!                    │  • Layout of the pane   │
//!                    │                         │
//!                    │  No I/O. Pure.          │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (crossterm)│
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: The `Message` entity and character wrapping
//! - [`geometry`]: Frame dimensions derived from the terminal size
//! - [`input`]: `InputState`, the editable line with horizontal scrolling
//! - [`scroll`]: `ScrollState`, vertical offset into the log
//! - [`layout`]: Fits the newest messages into the pane
//! - [`config`]: Settings file, env and CLI resolution

pub mod config;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod message;
pub mod scroll;
