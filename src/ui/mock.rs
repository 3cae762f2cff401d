//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! output for later assertion.
//!
//! # Example
//!
//! ```
//! use mobile_doctor::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.warning("adb is missing");
//! ui.hint("Install the Android SDK");
//!
//! assert_eq!(ui.warnings(), ["adb is missing"]);
//! assert_eq!(ui.hints(), ["Install the Android SDK"]);
//! ```

use super::UserInterface;

/// Captures every UI call.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    hints: Vec<String>,
    headers: Vec<String>,
    rows: Vec<(String, String)>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Key/value rows shown, in order.
    pub fn rows(&self) -> &[(String, String)] {
        &self.rows
    }

    /// Whether any captured output contains `text`.
    pub fn has_output(&self, text: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .chain(&self.hints)
            .any(|m| m.contains(text))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn hint(&mut self, msg: &str) {
        self.hints.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn key_values(&mut self, rows: &[(&str, String)]) {
        self.rows
            .extend(rows.iter().map(|(k, v)| (k.to_string(), v.clone())));
    }
}
