use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// A fully resolved analysis tool invocation.
///
/// The working directory is explicit. The process-wide current directory is
/// never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: Vec<(String, String)>,
}

impl LintCommand {
    pub fn new(program: String, args: Vec<String>, working_dir: PathBuf) -> Self {
        Self {
            program,
            args,
            working_dir,
            env: Vec::new(),
        }
    }

    pub fn with_env(mut self, key: String, value: String) -> Self {
        self.env.push((key, value));
        self
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = quote_arg(&self.program);
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(&quote_arg(arg));
        }
        cmd
    }

    /// Run the tool from `working_dir` with inherited stdio and wait for it
    pub fn execute(&self) -> Result<ExitStatus> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.working_dir);

        for (key, value) in &self.env {
            debug!("Setting env: {}={}", key, value);
            cmd.env(key, value);
        }

        cmd.status().map_err(|source| Error::SpawnError {
            program: self.program.clone(),
            source,
        })
    }
}

fn quote_arg(arg: &str) -> String {
    let needs_quotes = arg.is_empty()
        || arg
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '$' | '`' | '\\' | ';' | '&' | '|' | '*'));
    if needs_quotes {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> LintCommand {
        LintCommand::new(
            "pylint".to_string(),
            args.iter().map(|a| a.to_string()).collect(),
            PathBuf::from("/work/repo"),
        )
    }

    #[test]
    fn test_shell_command_plain() {
        let cmd = command(&["--rcfile=dev/conf/.pylintrc", "src"]);
        insta::assert_snapshot!(cmd.to_shell_command(), @"pylint --rcfile=dev/conf/.pylintrc src");
    }

    #[test]
    fn test_shell_command_quotes_special_args() {
        let cmd = command(&["--msg-template={path}: {msg}", "it's", "", "src"]);
        insta::assert_snapshot!(
            cmd.to_shell_command(),
            @r#"pylint '--msg-template={path}: {msg}' 'it'\''s' '' src"#
        );
    }

    #[test]
    fn test_with_env_keeps_order() {
        let cmd = command(&[])
            .with_env("B".to_string(), "2".to_string())
            .with_env("A".to_string(), "1".to_string());
        assert_eq!(
            cmd.env,
            vec![
                ("B".to_string(), "2".to_string()),
                ("A".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn test_execute_missing_program() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let cmd = LintCommand::new(
            "lintgate-no-such-linter".to_string(),
            Vec::new(),
            temp_dir.path().to_path_buf(),
        );
        let err = cmd.execute().unwrap_err();
        assert!(err.to_string().contains("lintgate-no-such-linter"));
    }
}
