use anyhow::Result;
use clap::Parser;
use lintgate::Lintgate;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    // Logs go to stderr so the tool's own stdout stays untouched
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Lintgate::parse();
    cli.command.execute()
}
