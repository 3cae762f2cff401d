//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::sync::Arc;

use crate::cli::args::{Cli, Commands, DoctorArgs};
use crate::doctor::Doctor;
use crate::error::Result;
use crate::sys::SystemContext;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing output through `ui`.
    fn execute(&mut self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Process exit status. Codes outside `0..=255` become 1.
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    ctx: Arc<SystemContext>,
    caching: bool,
}

impl CommandDispatcher {
    /// Create a dispatcher that inspects `ctx`.
    pub fn new(ctx: Arc<SystemContext>, caching: bool) -> Self {
        Self { ctx, caching }
    }

    fn doctor(&self) -> Doctor {
        let mut doctor = Doctor::new(self.ctx.clone());
        doctor.set_caching_enabled(self.caching);
        doctor
    }

    /// Route the CLI subcommand to its implementation and execute it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Doctor(args)) => {
                super::doctor::DoctorCommand::new(self.doctor(), args.clone()).execute(ui)
            }
            Some(Commands::Info(args)) => {
                super::info::InfoCommand::new(self.doctor(), args.clone()).execute(ui)
            }
            Some(Commands::CanBuild(args)) => {
                super::can_build::CanBuildCommand::new(self.doctor(), args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                super::doctor::DoctorCommand::new(self.doctor(), DoctorArgs::default()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::mock::{MockFileSystem, MockRegistry, MockRunner};
    use crate::sys::{EnvVars, HostFamily};
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn exit_status_does_not_truncate() {
        assert_eq!(CommandResult::failure(2).exit_status(), 2);
        assert_eq!(CommandResult::failure(256).exit_status(), 1);
        assert_eq!(CommandResult::failure(-1).exit_status(), 1);
        assert_eq!(CommandResult::success().exit_status(), 0);
    }

    #[test]
    fn no_command_runs_doctor() {
        let ctx = Arc::new(SystemContext::new(
            HostFamily::Linux,
            EnvVars::default(),
            Arc::new(MockRunner::new()),
            Arc::new(MockFileSystem::new()),
            Arc::new(MockRegistry::new()),
        ));
        let dispatcher = CommandDispatcher::new(ctx, true);
        let cli = Cli::parse_from(["mobile-doctor"]);
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
        assert!(ui
            .warnings()
            .iter()
            .any(|w| w.contains("You can develop for iOS only on Mac OS X systems")));
    }
}
