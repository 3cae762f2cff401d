//! Command implementations.

pub mod can_build;
pub mod completions;
pub mod dispatcher;
pub mod doctor;
pub mod info;

pub use can_build::CanBuildCommand;
pub use completions::CompletionsCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use doctor::DoctorCommand;
pub use info::InfoCommand;
