//! Demo applications built on [`Interface`](crate::tui::Interface).

pub mod calculator;
pub mod ticker;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use log::warn;

use crate::tui::{Backend, Interface, InterfaceError, InterfaceOptions};

pub fn run_calculator(
    backend: Arc<dyn Backend>,
    options: InterfaceOptions,
    show_tree: bool,
) -> Result<(), InterfaceError> {
    Interface::new(backend, options, calculator::Calculator::new(show_tree)).start()
}

/// Run the ticker until Escape, then wait for the ticker thread to finish.
pub fn run_ticker(
    backend: Arc<dyn Backend>,
    options: InterfaceOptions,
    interval: Duration,
) -> Result<(), InterfaceError> {
    let stop = Arc::new(AtomicBool::new(false));
    let ui = Interface::new(backend, options, ticker::Echo::new(Arc::clone(&stop)));
    let handle = ticker::spawn(ui.clone(), interval, stop)?;

    let result = ui.start();
    if handle.join().is_err() {
        warn!("Ticker thread panicked");
    }
    result
}
