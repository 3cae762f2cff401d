//! Doctor command implementation.
//!
//! The `mobile-doctor doctor` command lists every problem found, each with
//! a suggested fix.

use crate::cli::args::DoctorArgs;
use crate::doctor::Doctor;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The doctor command implementation.
pub struct DoctorCommand {
    doctor: Doctor,
    args: DoctorArgs,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(doctor: Doctor, args: DoctorArgs) -> Self {
        Self { doctor, args }
    }
}

impl Command for DoctorCommand {
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let warnings = self.doctor.warnings();

        if self.args.json {
            let json = serde_json::to_string_pretty(&warnings).map_err(anyhow::Error::from)?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header("Mobile Doctor");

        if warnings.is_empty() {
            ui.success("No issues were detected.");
            return Ok(CommandResult::success());
        }

        for warning in &warnings {
            ui.warning(&warning.message);
            ui.hint(&warning.remediation);
            if !warning.platforms.is_empty() {
                let names: Vec<_> = warning.platforms.iter().map(|p| p.name()).collect();
                ui.message(&format!("  Affects: {}", names.join(", ")));
            }
        }

        ui.message("");
        ui.message(&format!(
            "{} issue{} found.",
            warnings.len(),
            if warnings.len() == 1 { "" } else { "s" }
        ));

        Ok(CommandResult::success())
    }
}
