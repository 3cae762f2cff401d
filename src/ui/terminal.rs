//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, DoctorTheme, UserInterface};

/// Writes styled output to stdout; errors go to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: DoctorTheme,
}

impl TerminalUI {
    /// Create a terminal UI, colored unless disabled.
    pub fn new(no_color: bool) -> Self {
        let theme = if should_use_colors(no_color) {
            DoctorTheme::new()
        } else {
            DoctorTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
        }
    }

    /// The active theme.
    pub fn theme(&self) -> &DoctorTheme {
        &self.theme
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn hint(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_hint(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
    }

    fn key_values(&mut self, rows: &[(&str, String)]) {
        let mut table = super::KeyValueTable::new();
        for (key, value) in rows {
            table.add_row(key, value);
        }
        writeln!(self.out, "{}", table.render(&self.theme)).ok();
    }
}
