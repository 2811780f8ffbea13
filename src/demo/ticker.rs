//! Ticker demo: a background thread posts a numbered, timestamped message at
//! a fixed interval while user input is echoed back.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::Local;
use log::{debug, warn};

use crate::tui::{Handler, Interface};

pub const ECHO_SENDER: &str = "you";
pub const TICK_SENDER: &str = "ticker";

/// Echoes input and raises the shared stop flag when the interface exits.
pub struct Echo {
    stop: Arc<AtomicBool>,
}

impl Echo {
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self { stop }
    }
}

impl Handler for Echo {
    fn on_user_input(&self, ui: &Interface, input: String) {
        if let Err(e) = ui.add_message(input, Some(ECHO_SENDER)) {
            warn!("Failed to echo input: {}", e);
        }
    }

    fn on_exit(&self, _ui: &Interface) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// Post `Message <n>` every `interval` until `stop` is raised.
pub fn spawn(ui: Interface, interval: Duration, stop: Arc<AtomicBool>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("ticker".to_string())
        .spawn(move || {
            let mut n: u64 = 1;
            while !stop.load(Ordering::SeqCst) {
                let body = format!("Message {} at {}", n, Local::now().format("%H:%M:%S"));
                if let Err(e) = ui.add_message(body, Some(TICK_SENDER)) {
                    warn!("Ticker failed to post message {}: {}", n, e);
                }
                n += 1;
                thread::sleep(interval);
            }
            debug!("Ticker exiting after {} messages", n - 1);
        })
}
