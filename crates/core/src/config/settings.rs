use crate::{
    command::LintCommand,
    error::{Error, Result},
    root::RepositoryRoot,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::validate_settings;

/// File name of the settings file, always looked up at the repository root
pub const SETTINGS_FILE_NAME: &str = ".lintgate.json";

pub const DEFAULT_TOOL: &str = "pylint";
pub const DEFAULT_RULES_FLAG: &str = "--rcfile";
pub const DEFAULT_RULES_FILE: &str = "dev/conf/.pylintrc";
pub const DEFAULT_TARGET: &str = "src";

/// Which tool to run, with which rule file, against which tree.
///
/// Paths are relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct GateSettings {
    pub tool: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_args: Vec<String>,
    pub rules_flag: String,
    pub rules_file: PathBuf,
    pub target: PathBuf,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            tool_args: Vec::new(),
            rules_flag: DEFAULT_RULES_FLAG.to_string(),
            rules_file: PathBuf::from(DEFAULT_RULES_FILE),
            target: PathBuf::from(DEFAULT_TARGET),
            env: BTreeMap::new(),
        }
    }
}

impl GateSettings {
    /// Load `.lintgate.json` from the root, falling back to defaults when the
    /// file does not exist.
    pub fn load_from_root(root: &RepositoryRoot) -> Result<Self> {
        let path = root.join(SETTINGS_FILE_NAME);
        if !path.is_file() {
            debug!("No {} at {}, using defaults", SETTINGS_FILE_NAME, root);
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        debug!("Loading settings from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        validate_settings(self)?;
        let mut contents = serde_json::to_string_pretty(self)?;
        contents.push('\n');
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The rule file argument, e.g. `--rcfile=dev/conf/.pylintrc`
    pub fn rules_arg(&self) -> String {
        format!("{}={}", self.rules_flag, self.rules_file.display())
    }

    /// Build the tool invocation.
    ///
    /// Order is fixed: tool args, rule file, caller flags, target. Caller
    /// flags are forwarded untouched.
    pub fn build_command(&self, root: &RepositoryRoot, flags: &[String]) -> LintCommand {
        let mut args = Vec::with_capacity(self.tool_args.len() + flags.len() + 2);
        args.extend(self.tool_args.iter().cloned());
        args.push(self.rules_arg());
        args.extend(flags.iter().cloned());
        args.push(self.target.display().to_string());

        let mut command = LintCommand::new(self.tool.clone(), args, root.path().to_path_buf());
        for (key, value) in &self.env {
            command = command.with_env(key.clone(), value.clone());
        }
        command
    }
}
