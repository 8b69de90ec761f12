//! Settings validation, run on load and before saving

use super::GateSettings;
use crate::error::{Error, Result};
use std::path::Path;

pub fn validate_settings(settings: &GateSettings) -> Result<()> {
    if settings.tool.trim().is_empty() {
        return Err(Error::ConfigError("`tool` must not be empty".to_string()));
    }
    if settings.rules_flag.trim().is_empty() {
        return Err(Error::ConfigError("`rules_flag` must not be empty".to_string()));
    }
    check_root_relative("rules_file", &settings.rules_file)?;
    check_root_relative("target", &settings.target)?;
    Ok(())
}

fn check_root_relative(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::ConfigError(format!("`{field}` must not be empty")));
    }
    if path.is_absolute() {
        return Err(Error::ConfigError(format!(
            "`{field}` must be relative to the repository root, got {}",
            path.display()
        )));
    }
    Ok(())
}
