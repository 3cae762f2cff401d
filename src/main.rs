//! mobile-doctor CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use mobile_doctor::cli::{Cli, CommandDispatcher};
use mobile_doctor::config::load_config;
use mobile_doctor::sys::{cleanup_tracked_dirs, install_interrupt_cleanup, SystemContext};
use mobile_doctor::ui::{TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("mobile_doctor=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mobile_doctor=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("mobile-doctor starting with args: {:?}", cli);

    let mut ui = TerminalUI::new(cli.no_color);

    if let Err(e) = install_interrupt_cleanup() {
        tracing::warn!("Could not install interrupt handler: {}", e);
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let ctx = config.apply(SystemContext::system());
    let dispatcher = CommandDispatcher::new(ctx, config.cache && !cli.no_cache);

    let code = match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => result.exit_status(),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            1
        }
    };

    cleanup_tracked_dirs();
    ExitCode::from(code)
}
