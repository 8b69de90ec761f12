use anyhow::{Context, Result};
use lintgate_core::LintRunner;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::cli::RootArgs;

pub fn run_command(root_args: &RootArgs, flags: &[String], dry_run: bool) -> Result<ExitCode> {
    let anchor = root_args.anchor()?;
    debug!("Running gate from anchor {} with flags {:?}", anchor.display(), flags);

    let runner = LintRunner::new(anchor)
        .with_fallback_anchor(root_args.fallback_anchor())
        .with_locator(root_args.locator());

    if dry_run {
        let plan = runner.plan(flags)?;
        println!("{}", plan.command.to_shell_command());
        println!("Working directory: {}", plan.command.working_dir.display());
        if !plan.command.env.is_empty() {
            println!("Environment variables:");
            for (key, value) in &plan.command.env {
                println!("  {}={}", key, value);
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = runner.run(flags).context("Lint gate did not run")?;
    if !outcome.success() {
        info!("Analysis tool exited with code {}", outcome.code());
    }

    Ok(outcome.exit_code())
}
