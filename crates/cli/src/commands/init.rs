use anyhow::{Context, Result, bail};
use lintgate_core::{GateSettings, config::SETTINGS_FILE_NAME};
use std::process::ExitCode;
use tracing::info;

use crate::cli::RootArgs;

pub fn init_command(root_args: &RootArgs, force: bool) -> Result<ExitCode> {
    let root = root_args
        .resolve_root()
        .context("Cannot initialize outside a checkout")?;

    let config_path = root.join(SETTINGS_FILE_NAME);
    if config_path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    let settings = GateSettings::default();
    settings
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    info!("Wrote default settings for {}", root);
    println!("✅ Created config: {}", config_path.display());
    println!("   Tool: {}", settings.tool);
    println!("   Rules: {}", settings.rules_arg());
    println!("   Target: {}", settings.target.display());

    Ok(ExitCode::SUCCESS)
}
