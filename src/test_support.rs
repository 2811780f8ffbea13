//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::io;
use std::sync::{Condvar, Mutex};
use std::thread;
use std::time::Duration;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::tui::backend::Backend;
use crate::tui::event::Key;
use crate::tui::frame::Frame;
use crate::tui::interface::{Handler, Interface};

/// An in-memory terminal: replays queued keys and records what was drawn.
///
/// Once the queue is empty, `read_key` answers `Escape` so a running
/// interface always winds down. A [`blocking`](Self::blocking) backend
/// instead waits for [`push_key`](Self::push_key), like a real terminal.
pub struct ScriptedBackend {
    size: Mutex<(u16, u16)>,
    keys: Mutex<VecDeque<Key>>,
    key_ready: Condvar,
    blocking: AtomicBool,
    waiting_readers: AtomicUsize,
    frames: Mutex<Vec<Frame>>,
    bells: AtomicUsize,
    entered: AtomicUsize,
    left: AtomicUsize,
    fail_reads: AtomicBool,
}

impl ScriptedBackend {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            size: Mutex::new((columns, rows)),
            keys: Mutex::new(VecDeque::new()),
            key_ready: Condvar::new(),
            blocking: AtomicBool::new(false),
            waiting_readers: AtomicUsize::new(0),
            frames: Mutex::new(Vec::new()),
            bells: AtomicUsize::new(0),
            entered: AtomicUsize::new(0),
            left: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn with_keys(self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys.lock().unwrap().extend(keys);
        self
    }

    /// Make every `read_key` fail, as a closed stdin would.
    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    /// Make `read_key` block on an empty queue instead of answering `Escape`.
    pub fn blocking(self) -> Self {
        self.blocking.store(true, Ordering::SeqCst);
        self
    }

    pub fn push_key(&self, key: Key) {
        self.keys.lock().unwrap().push_back(key);
        self.key_ready.notify_all();
    }

    /// Wait until some thread is parked inside `read_key`.
    pub fn wait_for_reader(&self) {
        while self.waiting_readers.load(Ordering::SeqCst) == 0 {
            thread::sleep(Duration::from_millis(1));
        }
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.lock().unwrap().len()
    }

    pub fn set_size(&self, columns: u16, rows: u16) {
        *self.size.lock().unwrap() = (columns, rows);
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frames.lock().unwrap().last().cloned()
    }

    pub fn bells(&self) -> usize {
        self.bells.load(Ordering::SeqCst)
    }

    pub fn enter_count(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    pub fn leave_count(&self) -> usize {
        self.left.load(Ordering::SeqCst)
    }
}

impl Backend for ScriptedBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(*self.size.lock().unwrap())
    }

    fn read_key(&self) -> io::Result<Key> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let mut keys = self.keys.lock().unwrap();
        if !self.blocking.load(Ordering::SeqCst) {
            return Ok(keys.pop_front().unwrap_or(Key::Escape));
        }
        loop {
            if let Some(key) = keys.pop_front() {
                return Ok(key);
            }
            self.waiting_readers.fetch_add(1, Ordering::SeqCst);
            keys = self.key_ready.wait(keys).unwrap();
            self.waiting_readers.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn draw(&self, frame: &Frame) -> io::Result<()> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }

    fn bell(&self) -> io::Result<()> {
        self.bells.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn enter(&self) -> io::Result<()> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn leave(&self) -> io::Result<()> {
        self.left.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records every callback. Optionally echoes input back as a message, or
/// stops the interface when a given line is submitted.
#[derive(Default)]
pub struct RecordingHandler {
    inputs: Mutex<Vec<String>>,
    exits: AtomicUsize,
    echo: bool,
    stop_on: Option<String>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn stopping_on(line: &str) -> Self {
        Self {
            stop_on: Some(line.to_string()),
            ..Self::default()
        }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }

    pub fn exits(&self) -> usize {
        self.exits.load(Ordering::SeqCst)
    }
}

impl Handler for RecordingHandler {
    fn on_user_input(&self, ui: &Interface, input: String) {
        self.inputs.lock().unwrap().push(input.clone());
        if self.stop_on.as_deref() == Some(input.as_str()) {
            ui.stop();
        } else if self.echo {
            ui.add_message(input, Some("you")).unwrap();
        }
    }

    fn on_exit(&self, _ui: &Interface) {
        self.exits.fetch_add(1, Ordering::SeqCst);
    }
}
