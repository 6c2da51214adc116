use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod io;
mod output;

fn main() -> ExitCode {
    let cli = args::Cli::parse();
    output::init(cli.json);

    // RUST_LOG overrides; logs go to stderr so stdout stays machine-readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cmd::dispatch(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            output::eprintln_line(&format!("error: {e:#}"));
            ExitCode::from(2)
        }
    }
}
