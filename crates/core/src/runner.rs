//! Main runner that resolves the repository root and runs the gate from it

use crate::{
    command::{Executor, LintCommand, LintOutcome, ProcessExecutor},
    config::GateSettings,
    error::Result,
    root::{RepositoryRoot, RootLocator, RootStrategy, locate_with_fallback},
};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// The two steps a run goes through. There are no retries and no branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    ResolvingRoot,
    RunningTool,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPhase::ResolvingRoot => write!(f, "resolving root"),
            RunPhase::RunningTool => write!(f, "running tool"),
        }
    }
}

/// Everything needed to run the gate, resolved but not yet executed
#[derive(Debug, Clone)]
pub struct LintPlan {
    pub root: RepositoryRoot,
    pub settings: GateSettings,
    pub command: LintCommand,
}

impl LintPlan {
    pub fn rules_path(&self) -> PathBuf {
        self.root.join(&self.settings.rules_file)
    }

    pub fn target_path(&self) -> PathBuf {
        self.root.join(&self.settings.target)
    }

    /// Log missing inputs. The tool is still run and reports them itself.
    fn warn_missing_inputs(&self) {
        let rules = self.rules_path();
        if !rules.is_file() {
            warn!("Rule file {} does not exist", rules.display());
        }
        let target = self.target_path();
        if !target.exists() {
            warn!("Target {} does not exist", target.display());
        }
    }
}

pub struct LintRunner<E: Executor = ProcessExecutor> {
    anchor: PathBuf,
    fallback_anchor: Option<PathBuf>,
    locator: Box<dyn RootLocator>,
    executor: E,
}

impl LintRunner<ProcessExecutor> {
    /// Runner that resolves the root from `anchor` using VCS markers
    pub fn new(anchor: impl Into<PathBuf>) -> Self {
        Self {
            anchor: anchor.into(),
            fallback_anchor: None,
            locator: RootStrategy::default().locator(None),
            executor: ProcessExecutor::new(),
        }
    }
}

impl<E: Executor> LintRunner<E> {
    /// Second place to look for a root when none encloses the anchor
    pub fn with_fallback_anchor(mut self, fallback: Option<PathBuf>) -> Self {
        self.fallback_anchor = fallback;
        self
    }

    pub fn with_locator(mut self, locator: Box<dyn RootLocator>) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_executor<F: Executor>(self, executor: F) -> LintRunner<F> {
        LintRunner {
            anchor: self.anchor,
            fallback_anchor: self.fallback_anchor,
            locator: self.locator,
            executor,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn resolve_root(&self) -> Result<RepositoryRoot> {
        debug!(
            "{}: anchor={}, locator={}",
            RunPhase::ResolvingRoot,
            self.anchor.display(),
            self.locator.name()
        );
        locate_with_fallback(
            self.locator.as_ref(),
            &self.anchor,
            self.fallback_anchor.as_deref(),
        )
    }

    /// Resolve the root, then load settings from it and build the command.
    ///
    /// Settings are only read once a root exists.
    pub fn plan(&self, flags: &[String]) -> Result<LintPlan> {
        let root = self.resolve_root()?;
        debug!("Repository root: {}", root);

        let settings = GateSettings::load_from_root(&root)?;
        let command = settings.build_command(&root, flags);

        Ok(LintPlan {
            root,
            settings,
            command,
        })
    }

    /// Run the gate once and return the tool's exit status unchanged
    pub fn run(&self, flags: &[String]) -> Result<LintOutcome> {
        let plan = self.plan(flags)?;
        plan.warn_missing_inputs();

        info!("Running: {}", plan.command.to_shell_command());
        debug!(
            "{}: working directory {}",
            RunPhase::RunningTool,
            plan.command.working_dir.display()
        );

        let outcome = self.executor.execute(&plan.command)?;
        debug!("Tool finished with code {}", outcome.code());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, MarkerLocator, config::SETTINGS_FILE_NAME};
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct RecordingExecutor {
        code: i32,
        calls: Mutex<Vec<LintCommand>>,
    }

    impl RecordingExecutor {
        fn new(code: i32) -> Self {
            Self {
                code,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<LintCommand> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Executor for RecordingExecutor {
        fn execute(&self, command: &LintCommand) -> Result<LintOutcome> {
            self.calls.lock().unwrap().push(command.clone());
            Ok(LintOutcome::from_code(self.code))
        }
    }

    fn checkout(temp_dir: &TempDir) -> PathBuf {
        let root = temp_dir.path().join("repo");
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("dev/conf")).unwrap();
        fs::create_dir_all(root.join("src/pkg/nested")).unwrap();
        fs::write(root.join("dev/conf/.pylintrc"), "[MASTER]\n").unwrap();
        root.canonicalize().unwrap()
    }

    fn runner(temp_dir: &TempDir, anchor: PathBuf, code: i32) -> LintRunner<RecordingExecutor> {
        LintRunner::new(anchor)
            .with_locator(Box::new(MarkerLocator::new().with_ceiling(temp_dir.path())))
            .with_executor(RecordingExecutor::new(code))
    }

    #[test]
    fn test_nested_dir_runs_once_from_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = checkout(&temp_dir);
        let runner = runner(&temp_dir, root.join("src/pkg/nested"), 0);

        let outcome = runner.run(&[]).unwrap();
        assert!(outcome.success());

        let calls = runner.executor().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "pylint");
        assert_eq!(calls[0].args, vec!["--rcfile=dev/conf/.pylintrc", "src"]);
        assert_eq!(calls[0].working_dir, root);
    }

    #[test]
    fn test_violation_code_is_mirrored() {
        let temp_dir = TempDir::new().unwrap();
        let root = checkout(&temp_dir);
        let runner = runner(&temp_dir, root, 28);

        let outcome = runner.run(&[]).unwrap();
        assert_eq!(outcome.code(), 28);
    }

    #[test]
    fn test_flags_forwarded_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let root = checkout(&temp_dir);
        let runner = runner(&temp_dir, root.join("src"), 0);
        let flags = vec![
            "--disable=C0301".to_string(),
            "--".to_string(),
            "two words".to_string(),
        ];

        runner.run(&flags).unwrap();

        let calls = runner.executor().calls();
        assert_eq!(
            calls[0].args,
            vec!["--rcfile=dev/conf/.pylintrc", "--disable=C0301", "--", "two words", "src"]
        );
        assert_eq!(calls[0].working_dir, root);
    }

    #[test]
    fn test_missing_root_aborts_before_tool_and_settings() {
        let temp_dir = TempDir::new().unwrap();
        let loose = temp_dir.path().join("loose");
        fs::create_dir_all(&loose).unwrap();
        // Would fail to parse if it were ever read
        fs::write(loose.join(SETTINGS_FILE_NAME), "{ not json").unwrap();
        let runner = runner(&temp_dir, loose, 0);

        let err = runner.run(&[]).unwrap_err();
        assert!(matches!(err, Error::RootNotFound { .. }));
        assert!(runner.executor().calls().is_empty());
    }

    #[test]
    fn test_fallback_anchor_used_outside_checkout() {
        let temp_dir = TempDir::new().unwrap();
        let root = checkout(&temp_dir);
        let elsewhere = temp_dir.path().join("elsewhere");
        fs::create_dir_all(&elsewhere).unwrap();
        let runner = runner(&temp_dir, elsewhere, 0)
            .with_fallback_anchor(Some(root.join("src/pkg")));

        runner.run(&[]).unwrap();

        let calls = runner.executor().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].working_dir, root);
    }

    #[test]
    fn test_settings_read_from_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = checkout(&temp_dir);
        fs::write(
            root.join(SETTINGS_FILE_NAME),
            r#"{ "tool": "ruff", "tool_args": ["check"], "rules_flag": "--config", "rules_file": "ruff.toml", "target": "src/pkg" }"#,
        )
        .unwrap();
        let runner = runner(&temp_dir, root.join("src/pkg/nested"), 0);

        let plan = runner.plan(&["--fix".to_string()]).unwrap();
        assert_eq!(plan.root.path(), root);
        assert_eq!(plan.rules_path(), root.join("ruff.toml"));
        assert_eq!(plan.command.program, "ruff");
        assert_eq!(
            plan.command.args,
            vec!["check", "--config=ruff.toml", "--fix", "src/pkg"]
        );
        assert!(runner.executor().calls().is_empty());
    }

    #[test]
    fn test_broken_settings_abort_before_tool() {
        let temp_dir = TempDir::new().unwrap();
        let root = checkout(&temp_dir);
        fs::write(root.join(SETTINGS_FILE_NAME), "[]").unwrap();
        let runner = runner(&temp_dir, root, 0);

        let err = runner.run(&[]).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert!(runner.executor().calls().is_empty());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RunPhase::ResolvingRoot.to_string(), "resolving root");
        assert_eq!(RunPhase::RunningTool.to_string(), "running tool");
    }
}
