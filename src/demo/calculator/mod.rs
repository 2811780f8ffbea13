//! Calculator demo: each submitted line is evaluated and the result posted
//! back to the log.

pub mod expr;

use log::{debug, warn};

use crate::tui::{Handler, Interface};

pub use expr::{CalcError, Expr};

pub struct Calculator {
    show_tree: bool,
}

impl Calculator {
    pub fn new(show_tree: bool) -> Self {
        Self { show_tree }
    }

    /// The messages posted for one submitted line: the result, preceded by
    /// the expression tree when enabled and the line parsed.
    pub fn respond(&self, input: &str) -> Vec<String> {
        let parsed = Expr::parse(input);
        let mut replies = Vec::new();

        if self.show_tree
            && let Ok(expr) = &parsed
        {
            replies.push(expr.to_json().to_string());
        }

        let outcome = match parsed.and_then(|expr| expr.eval()) {
            Ok(value) => value.to_string(),
            Err(e) => {
                debug!("Rejected {:?}: {}", input, e);
                match e {
                    CalcError::DivisionByZero => "Division By Zero".to_string(),
                    CalcError::Overflow => "Overflow".to_string(),
                    CalcError::Incomplete | CalcError::UnexpectedChar { .. } => {
                        "Invalid Input".to_string()
                    }
                }
            }
        };
        replies.push(format!("{input} = {outcome}"));
        replies
    }
}

impl Handler for Calculator {
    fn on_user_input(&self, ui: &Interface, input: String) {
        for reply in self.respond(&input) {
            if let Err(e) = ui.add_message(reply, None) {
                warn!("Failed to post calculator result: {}", e);
            }
        }
    }
}
