//! # Interface Engine
//!
//! Owns all widget state and ties key input, message arrivals and drawing
//! together.
//!
//! ## Threads
//!
//! ```text
//!  key-reader thread                 embedder threads
//!  ─────────────────                 ────────────────
//!  backend.read_key()  (blocks)      add_message()
//!        │                                 │
//!   dispatch(key)                     [log] append, pin scroll
//!   [edit] refresh + edit/scroll           │
//!        │                                 │
//!        └──────────────┬──────────────────┘
//!                       ▼
//!                    render()
//!          [edit] refresh geometry
//!          [draw]   serialize terminal writes
//!          [log]    lay out visible messages
//!                   backend.draw(frame)   (log released)
//! ```
//!
//! Three locks, always taken in the order edit → draw → log. Scroll commands
//! take edit → log. `add_message` takes log alone and releases it before
//! rendering. The embedder's callbacks run with no lock held, so they may call
//! back into the interface.
//!
//! ## Shutdown
//!
//! `stop()` flips the state flag and restores the terminal. It cannot wake a
//! blocked `read_key`: the reader notices the flag after the next key arrives
//! and discards that key. Shutdown latency from another thread is therefore
//! the time until the next keypress.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use log::{debug, info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::geometry::Geometry;
use crate::core::input::{Edit, InputState, is_printable};
use crate::core::layout::layout;
use crate::core::message::Message;
use crate::core::scroll::{DEFAULT_PAGE_SIZE, ScrollState};
use crate::tui::backend::Backend;
use crate::tui::event::Key;
use crate::tui::frame::FrameRenderer;
use crate::tui::session::TerminalSession;

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;

/// Callbacks supplied by the embedding application.
pub trait Handler: Send + Sync {
    /// Called once per Enter with the submitted line. Runs on the key-reader
    /// thread between the submit and the next redraw.
    fn on_user_input(&self, ui: &Interface, input: String);

    /// Called once when the interface stops.
    fn on_exit(&self, _ui: &Interface) {}
}

impl<T: Handler + ?Sized> Handler for Arc<T> {
    fn on_user_input(&self, ui: &Interface, input: String) {
        (**self).on_user_input(ui, input);
    }

    fn on_exit(&self, ui: &Interface) {
        (**self).on_exit(ui);
    }
}

#[derive(Debug)]
pub enum InterfaceError {
    /// Terminal I/O failed.
    Io(io::Error),
    /// `start` was called on an interface that already ran.
    AlreadyStarted,
}

impl fmt::Display for InterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceError::Io(e) => write!(f, "terminal I/O error: {e}"),
            InterfaceError::AlreadyStarted => write!(f, "interface was already started"),
        }
    }
}

impl std::error::Error for InterfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterfaceError::Io(e) => Some(e),
            InterfaceError::AlreadyStarted => None,
        }
    }
}

impl From<io::Error> for InterfaceError {
    fn from(e: io::Error) -> Self {
        InterfaceError::Io(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceOptions {
    /// Width of the sender column; 0 hides it.
    pub sender_width: usize,
    /// Messages moved per PageUp/PageDown.
    pub page_size: usize,
}

impl Default for InterfaceOptions {
    fn default() -> Self {
        Self {
            sender_width: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl From<&ResolvedConfig> for InterfaceOptions {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            sender_width: config.sender_width,
            page_size: config.page_size,
        }
    }
}

/// Input line plus the geometry it was last clamped against.
struct EditState {
    geometry: Geometry,
    input: InputState,
}

struct MessageLog {
    messages: Vec<Message>,
    scroll: ScrollState,
}

struct Shared {
    backend: Arc<dyn Backend>,
    handler: Box<dyn Handler>,
    options: InterfaceOptions,
    renderer: FrameRenderer,
    edit: Mutex<EditState>,
    log: Mutex<MessageLog>,
    draw: Mutex<()>,
    state: AtomicU8,
    session: Mutex<Option<TerminalSession>>,
}

/// Guarded state is plain data, so a panic elsewhere never leaves it torn.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Restores the terminal if `start` unwinds or returns early.
struct SessionGuard<'a>(&'a Shared);

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        let session = lock(&self.0.session).take();
        drop(session);
    }
}

/// Handle to a message log + input line widget. Cheap to clone; every clone
/// drives the same interface.
#[derive(Clone)]
pub struct Interface {
    shared: Arc<Shared>,
}

impl Interface {
    /// Build an interface. No terminal I/O happens until [`start`](Self::start).
    pub fn new<H>(backend: Arc<dyn Backend>, options: InterfaceOptions, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                backend,
                handler: Box::new(handler),
                options,
                renderer: FrameRenderer::new(options.sender_width),
                edit: Mutex::new(EditState {
                    geometry: Geometry::measure(0, 0, options.sender_width),
                    input: InputState::new(),
                }),
                log: Mutex::new(MessageLog {
                    messages: Vec::new(),
                    scroll: ScrollState::new(),
                }),
                draw: Mutex::new(()),
                state: AtomicU8::new(IDLE),
                session: Mutex::new(None),
            }),
        }
    }

    /// Take over the terminal and process keys until stopped.
    ///
    /// Blocks the calling thread. An interface runs at most once.
    pub fn start(&self) -> Result<(), InterfaceError> {
        self.shared
            .state
            .compare_exchange(IDLE, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| InterfaceError::AlreadyStarted)?;
        info!("Interface starting (sender_width={})", self.shared.options.sender_width);

        let result = self.run();
        if let Err(e) = &result {
            warn!("Interface terminated with error: {}", e);
            self.stop();
        }
        result
    }

    fn run(&self) -> Result<(), InterfaceError> {
        let session = TerminalSession::acquire(Arc::clone(&self.shared.backend))?;
        *lock(&self.shared.session) = Some(session);
        let _guard = SessionGuard(&self.shared);

        self.render()?;

        let reader = self.clone();
        let handle = thread::Builder::new()
            .name("key-reader".to_string())
            .spawn(move || reader.read_loop())?;

        match handle.join() {
            Ok(result) => result.map_err(InterfaceError::from),
            // Embedder panics are not ours to swallow
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    /// Stop processing keys and restore the terminal. Idempotent; only the
    /// first call reaches [`Handler::on_exit`].
    pub fn stop(&self) {
        if self.shared.state.swap(STOPPED, Ordering::SeqCst) == STOPPED {
            return;
        }
        info!("Interface stopping");

        let session = {
            // Wait out any in-flight frame so nothing is drawn on the main screen
            let _draw = lock(&self.shared.draw);
            lock(&self.shared.session).take()
        };
        if let Some(session) = session
            && let Err(e) = session.release()
        {
            warn!("Failed to leave alternate screen: {}", e);
        }

        self.shared.handler.on_exit(self);
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.load(Ordering::SeqCst) == RUNNING
    }

    /// Append a message to the log and redraw. Callable from any thread.
    ///
    /// After the interface stops, messages are still recorded but nothing is drawn.
    pub fn add_message(&self, body: impl Into<String>, sender: Option<&str>) -> Result<(), InterfaceError> {
        {
            let mut log = lock(&self.shared.log);
            log.messages.push(Message::new(body, sender));
            log.scroll.on_message_added();
            debug!(
                "Message added (count={}, scroll_offset={})",
                log.messages.len(),
                log.scroll.offset
            );
        }
        self.render().map_err(InterfaceError::from)
    }

    pub fn message_count(&self) -> usize {
        lock(&self.shared.log).messages.len()
    }

    pub fn scroll_offset(&self) -> usize {
        lock(&self.shared.log).scroll.offset
    }

    /// Copy of the current input line state.
    pub fn input(&self) -> InputState {
        lock(&self.shared.edit).input.clone()
    }

    fn read_loop(&self) -> io::Result<()> {
        debug!("Key reader running");
        while self.is_running() {
            let key = self.shared.backend.read_key()?;
            if !self.is_running() {
                debug!("Discarding {:?} read after stop", key);
                break;
            }
            self.dispatch(key)?;
        }
        debug!("Key reader exiting");
        Ok(())
    }

    /// Apply one key, then redraw.
    pub(crate) fn dispatch(&self, key: Key) -> io::Result<()> {
        let page = self.shared.options.page_size;
        let outcome = match key {
            Key::Char(c) if is_printable(c) => self.with_input(|input, width| input.insert(c, width))?,
            Key::Enter => {
                let text = self.with_input(|input, _| input.submit())?;
                debug!("Submitting input ({} chars)", text.len());
                self.shared.handler.on_user_input(self, text);
                Edit::Applied
            }
            Key::Left => self.with_input(|input, _| input.move_left())?,
            Key::Right => self.with_input(|input, width| input.move_right(width))?,
            Key::Backspace => self.with_input(|input, width| input.backspace(width))?,
            Key::Delete => self.with_input(|input, width| input.delete(width))?,
            Key::Up => self.with_scroll(|scroll, count| scroll.up(1, count))?,
            Key::Down => self.with_scroll(|scroll, _| scroll.down(1))?,
            Key::PageUp => self.with_scroll(|scroll, count| scroll.up(page, count))?,
            Key::PageDown => self.with_scroll(|scroll, _| scroll.down(page))?,
            Key::Home => self.with_scroll(|scroll, _| {
                scroll.home();
                Edit::Applied
            })?,
            Key::Escape => {
                self.stop();
                return Ok(());
            }
            Key::Char(_) | Key::Resize | Key::Other => Edit::Applied,
        };

        if outcome == Edit::Boundary {
            debug!("{:?} at boundary", key);
            self.bell()?;
        }
        self.render()
    }

    /// Re-measure the terminal and re-clamp the input line against it.
    fn refresh(&self, edit: &mut EditState) -> io::Result<()> {
        let (columns, rows) = self.shared.backend.size()?;
        edit.geometry = Geometry::measure(columns, rows, self.shared.options.sender_width);
        edit.input.refresh_geometry(edit.geometry.input_width());
        Ok(())
    }

    fn with_input<R>(&self, f: impl FnOnce(&mut InputState, usize) -> R) -> io::Result<R> {
        let mut edit = lock(&self.shared.edit);
        self.refresh(&mut edit)?;
        let width = edit.geometry.input_width();
        Ok(f(&mut edit.input, width))
    }

    fn with_scroll(&self, f: impl FnOnce(&mut ScrollState, usize) -> Edit) -> io::Result<Edit> {
        let mut edit = lock(&self.shared.edit);
        self.refresh(&mut edit)?;
        let mut log = lock(&self.shared.log);
        let count = log.messages.len();
        let outcome = f(&mut log.scroll, count);
        debug!("Scroll offset now {}", log.scroll.offset);
        Ok(outcome)
    }

    fn bell(&self) -> io::Result<()> {
        let _draw = lock(&self.shared.draw);
        if !self.is_running() {
            return Ok(());
        }
        self.shared.backend.bell()
    }

    fn render(&self) -> io::Result<()> {
        if !self.is_running() {
            return Ok(());
        }

        let mut edit = lock(&self.shared.edit);
        self.refresh(&mut edit)?;
        let geometry = edit.geometry;

        let _draw = lock(&self.shared.draw);
        if !self.is_running() {
            return Ok(());
        }

        let frame = {
            let log = lock(&self.shared.log);
            let visible_end = log.messages.len().saturating_sub(log.scroll.offset);
            let pane = layout(
                log.messages[..visible_end].iter().rev(),
                geometry.usable_width,
                geometry.usable_height,
            );
            self.shared
                .renderer
                .compose(&geometry, &pane, &edit.input, log.scroll.is_scrolled())
        };

        self.shared.backend.draw(&frame)
    }
}
