//! Entry point of the `ba-pns` binary.
//!
//! Parses arguments, grows the requested networks, prints the summary to
//! stdout and maps failures to a non-zero exit status. Logging is installed
//! first so every later step can emit structured diagnostics.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, field};

use ba_pns_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, graph_code) = match err.downcast_ref::<CliError>() {
            Some(CliError::Growth(core)) => (Some(core.code()), core.graph_code()),
            None => (None, None),
        };
        error!(
            error = %err,
            code = code.map(|code| field::display(code.as_str())),
            graph_code = graph_code.map(|code| field::display(code.as_str())),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

// The subscriber is not installed when this runs.
fn report_logging_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
