//! Scripted [`GitInspector`] for unit tests.

use crate::inspector::GitInspector;
use gitundo_core::GitError;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Canned outputs keyed by space-joined argv. Unscripted `output` calls
/// fail, which reads as "ref does not exist" to the state helpers.
#[derive(Default)]
pub(crate) struct ScriptedGit {
    outputs: HashMap<String, String>,
    failing_runs: HashSet<String>,
    ran: RefCell<Vec<String>>,
}

fn key(verb: &str, args: &[&str]) -> String {
    std::iter::once(verb)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(command.to_string(), output.to_string());
        self
    }

    /// Make `rev-parse --verify --quiet <rev>` succeed.
    pub fn with_rev(self, rev: &str) -> Self {
        let cmd = format!("rev-parse --verify --quiet {rev}");
        self.with(&cmd, "0123456789abcdef0123456789abcdef01234567\n")
    }

    /// Empty staged, unstaged and untracked listings.
    pub fn clean_tree(self) -> Self {
        self.with("diff --cached --name-only", "")
            .with("diff --name-only", "")
            .with("ls-files --others --exclude-standard", "")
    }

    pub fn on_branch(self, name: &str) -> Self {
        self.with("rev-parse --abbrev-ref HEAD", &format!("{name}\n"))
            .with("symbolic-ref --quiet HEAD", &format!("refs/heads/{name}\n"))
    }

    pub fn run_fails(mut self, command: &str) -> Self {
        self.failing_runs.insert(command.to_string());
        self
    }

    /// Commands passed to `run`, in order, including the failing one.
    pub fn ran(&self) -> Vec<String> {
        self.ran.borrow().clone()
    }
}

impl GitInspector for ScriptedGit {
    fn run(&self, verb: &str, args: &[&str]) -> Result<(), GitError> {
        let k = key(verb, args);
        self.ran.borrow_mut().push(k.clone());
        if self.failing_runs.contains(&k) {
            let argv: Vec<&str> = std::iter::once(verb).chain(args.iter().copied()).collect();
            return Err(GitError::new(&argv, Some(1), "scripted failure"));
        }
        Ok(())
    }

    fn output(&self, verb: &str, args: &[&str]) -> Result<String, GitError> {
        let k = key(verb, args);
        self.outputs.get(&k).cloned().ok_or_else(|| {
            let argv: Vec<&str> = std::iter::once(verb).chain(args.iter().copied()).collect();
            GitError::new(&argv, Some(128), "unscripted")
        })
    }
}
