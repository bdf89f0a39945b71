//! Driftscope CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use driftscope::cli::{Cli, CommandDispatcher};
use driftscope::github::Annotation;
use driftscope::ui::{OutputMode, TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag (or `RUNNER_DEBUG=1` in Actions) sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("driftscope=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("driftscope=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");
    init_tracing(cli.debug || runner_debug);

    tracing::debug!("Driftscope starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = TerminalUI::new(output_mode);
    let dispatcher = CommandDispatcher::new(cli.config.clone());

    match dispatcher.dispatch(&cli, &mut ui) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            Annotation::error(e.to_string()).emit();
            ExitCode::from(1)
        }
    }
}
