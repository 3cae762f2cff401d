//! Info command implementation.
//!
//! The `mobile-doctor info` command shows every detected tool version.

use crate::cli::args::InfoArgs;
use crate::doctor::Doctor;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The info command implementation.
pub struct InfoCommand {
    doctor: Doctor,
    args: InfoArgs,
}

impl InfoCommand {
    /// Create a new info command.
    pub fn new(doctor: Doctor, args: InfoArgs) -> Self {
        Self { doctor, args }
    }
}

impl Command for InfoCommand {
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let snapshot = self.doctor.sys_info();

        if self.args.json {
            let json = serde_json::to_string_pretty(&snapshot).map_err(anyhow::Error::from)?;
            ui.message(&json);
        } else {
            ui.show_header("Environment");
            ui.key_values(&snapshot.rows());
        }

        Ok(CommandResult::success())
    }
}
