use anyhow::Context as _;
use gitundo_engine::{GitInspector, Options, Orchestrator, SystemGit};
use gitundo_log::{CommandLog, UndoConfig, UndoPaths};
use std::path::Path;

/// Overrides the log file location.
pub const LOG_ENV: &str = "GIT_UNDO_LOG";

/// Everything a command needs about the repository it runs in.
pub struct Context {
    pub paths: UndoPaths,
    pub config: UndoConfig,
    pub git: SystemGit,
}

impl Context {
    pub fn discover(cwd: &Path) -> anyhow::Result<Self> {
        let git = SystemGit::new(cwd);
        let git_dir = git
            .output("rev-parse", &["--git-dir"])
            .map_err(|e| anyhow::anyhow!("not inside a git repository: {}", e.stderr))?;
        let mut paths = UndoPaths::discover(UndoPaths::resolve_git_dir(cwd, &git_dir));
        if let Some(path) = std::env::var_os(LOG_ENV).filter(|p| !p.is_empty()) {
            paths = paths.with_log_file(path);
        }
        let config = UndoConfig::load(&paths)
            .with_context(|| format!("invalid config in {}", paths.config_json.display()))?;
        Ok(Self { paths, config, git })
    }

    pub fn log(&self) -> CommandLog {
        CommandLog::open(&self.paths)
    }

    pub fn orchestrator(&self, dry_run: bool) -> Orchestrator<&SystemGit> {
        let options = Options {
            dry_run,
            ..Options::from_config(&self.config)
        };
        Orchestrator::new(&self.git, self.log(), options)
    }
}

/// stderr logging; `--verbose` turns on debug output for this tool's crates.
/// `RUST_LOG` wins over both.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "warn,gitundo_core={level},gitundo_log={level},gitundo_engine={level},gitundo_cli={level}"
        )
    });
    tracing_subscriber::fmt()
        .with_env_filter(&filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
