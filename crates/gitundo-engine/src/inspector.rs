use gitundo_core::GitError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// The only door to the git binary. Strategies and the orchestrator never
/// spawn processes themselves.
pub trait GitInspector {
    /// Run `git <verb> <args>` for its effect.
    fn run(&self, verb: &str, args: &[&str]) -> Result<(), GitError>;

    /// Run `git <verb> <args>` and capture stdout.
    fn output(&self, verb: &str, args: &[&str]) -> Result<String, GitError>;
}

impl<T: GitInspector + ?Sized> GitInspector for &T {
    fn run(&self, verb: &str, args: &[&str]) -> Result<(), GitError> {
        (**self).run(verb, args)
    }

    fn output(&self, verb: &str, args: &[&str]) -> Result<String, GitError> {
        (**self).output(verb, args)
    }
}

/// Blocking `git` subprocesses rooted at a working directory.
#[derive(Debug, Clone)]
pub struct SystemGit {
    cwd: PathBuf,
}

impl SystemGit {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    fn exec(&self, verb: &str, args: &[&str]) -> Result<std::process::Output, GitError> {
        let argv: Vec<&str> = std::iter::once(verb).chain(args.iter().copied()).collect();
        debug!(cwd = %self.cwd.display(), argv = ?argv, "git");
        let out = Command::new(gitundo_core::PROGRAM)
            .args(&argv)
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| GitError::new(&argv, None, format!("cannot spawn git: {e}")))?;
        if out.status.success() {
            Ok(out)
        } else {
            Err(GitError::new(
                &argv,
                out.status.code(),
                String::from_utf8_lossy(&out.stderr),
            ))
        }
    }
}

impl GitInspector for SystemGit {
    fn run(&self, verb: &str, args: &[&str]) -> Result<(), GitError> {
        self.exec(verb, args).map(|_| ())
    }

    fn output(&self, verb: &str, args: &[&str]) -> Result<String, GitError> {
        self.exec(verb, args)
            .map(|out| String::from_utf8_lossy(&out.stdout).into_owned())
    }
}
