//! `peel`: decode a tar, gzip+tar or gzip stream, or pass it through unchanged.
//!
//! The decoded payload is written to stdout or `--output`; logs and error
//! reports go to stderr.

mod cli;
mod commands;
mod tracing;

use crate::commands::Command;
use crate::tracing::TracingConfig;

// Reports go to stderr; stdout is reserved for the decoded payload.
#[allow(clippy::print_stderr)]
#[tokio::main]
async fn main() {
    if let Err(error) = run_main().await {
        eprintln!("{error:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> miette::Result<()> {
    let cli = cli::parse();

    let format = cli.effective_log_format();
    crate::tracing::init_tracing(TracingConfig {
        format,
        level: cli.level.into(),
        enable_file_location: matches!(format, crate::tracing::TracingFormat::Dev),
        filter: cli.log_filter.clone(),
    })?;

    let command: Command = cli.command.into();
    commands::execute(command).await
}
