//! Terminal output.
//!
//! Commands write through the [`UserInterface`] trait so tests can use
//! [`MockUI`] instead of [`TerminalUI`].

pub mod mock;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use table::KeyValueTable;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, DoctorTheme};

/// Output sink for commands.
pub trait UserInterface {
    /// Plain line.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Written to stderr by the terminal UI.
    fn error(&mut self, msg: &str);

    /// Suggested next step, shown under a warning.
    fn hint(&mut self, msg: &str);

    fn show_header(&mut self, title: &str);

    /// Aligned `key: value` rows.
    fn key_values(&mut self, rows: &[(&str, String)]);
}
