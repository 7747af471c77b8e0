//! Ties the parser, the history log and the strategies together.
//!
//! `record` is called after every git command the user runs. `undo`, `redo`
//! and `back` read the log, plan through [`Strategy`], run the plan through
//! the [`GitInspector`] and only then flip the entry's undone flag, so a
//! failed step leaves the log pointing at the same entry.

use crate::inspector::GitInspector;
use crate::state;
use crate::strategy::{plan_back, Strategy};
use gitundo_core::{parse_command, CommandDetails, UndoCommand, UndoError};
use gitundo_log::{CommandLog, LogEntry, UndoConfig};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Plan and report without running anything or touching the log.
    pub dry_run: bool,
    /// Only consider entries recorded on the current ref.
    pub branch_scoped: bool,
    /// Record branch switches for the go-back command.
    pub track_navigation: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&UndoConfig::default())
    }
}

impl Options {
    pub fn from_config(config: &UndoConfig) -> Self {
        Self {
            dry_run: false,
            branch_scoped: config.branch_scoped,
            track_navigation: config.track_navigation,
        }
    }
}

/// What `record` did with a command line.
#[derive(Debug)]
pub enum LogOutcome {
    /// Read-only, own, or untracked command; the log is unchanged.
    Skipped,
    Logged {
        entry: LogEntry,
        /// Undone entries dropped because history diverged.
        truncated: Vec<LogEntry>,
    },
    /// Recorded so that undo stops here, but it has no inverse.
    LoggedNotUndoable { entry: LogEntry, reason: UndoError },
}

#[derive(Debug, Clone)]
pub struct UndoReport {
    pub entry: LogEntry,
    pub commands: Vec<UndoCommand>,
    pub executed: bool,
}

#[derive(Debug, Clone)]
pub struct RedoReport {
    pub entry: LogEntry,
    pub executed: bool,
}

#[derive(Debug, Clone)]
pub struct BackReport {
    /// Navigation entry walked back, when one was recorded.
    pub entry: Option<LogEntry>,
    pub commands: Vec<UndoCommand>,
    pub executed: bool,
}

pub struct Orchestrator<G> {
    git: G,
    log: CommandLog,
    options: Options,
}

impl<G: GitInspector> Orchestrator<G> {
    pub fn new(git: G, log: CommandLog, options: Options) -> Self {
        Self { git, log, options }
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn current_ref(&self) -> anyhow::Result<String> {
        Ok(state::current_ref(&self.git)?)
    }

    fn scope(&self) -> anyhow::Result<Option<String>> {
        if self.options.branch_scoped {
            Ok(Some(self.current_ref()?))
        } else {
            Ok(None)
        }
    }

    // ── Recording ──

    /// Record a command the user just ran. Parse failures are returned
    /// before anything is written.
    pub fn record(&self, raw: &str) -> anyhow::Result<LogOutcome> {
        let parsed = parse_command(raw)?;
        if !parsed.is_loggable() || (parsed.is_navigating() && !self.options.track_navigation) {
            debug!(command = raw, "not recorded");
            return Ok(LogOutcome::Skipped);
        }

        let reference = self.current_ref()?;
        let entry = LogEntry::new(&reference, raw);
        let truncated = self.log.append(&entry)?.truncated;

        if parsed.is_mutating() {
            let details = CommandDetails::new(raw, &parsed);
            if let Err(reason) = Strategy::for_details(&details).check(&details) {
                debug!(command = raw, %reason, "recorded without an inverse");
                return Ok(LogOutcome::LoggedNotUndoable { entry, reason });
            }
        }
        Ok(LogOutcome::Logged { entry, truncated })
    }

    // ── Undo / redo ──

    /// Undo the newest live regular entry.
    pub fn undo(&self) -> anyhow::Result<UndoReport> {
        let scope = self.scope()?;
        let Some(entry) = self.log.last_regular(scope.as_deref())? else {
            return Err(nothing_to("undo", scope.as_deref()).into());
        };
        let commands = self.plan(&entry)?;
        if self.options.dry_run {
            return Ok(UndoReport { entry, commands, executed: false });
        }

        self.execute(&commands)?;
        let entry = self.log.toggle(&entry)?;
        info!(command = %entry.command, steps = commands.len(), "undone");
        Ok(UndoReport { entry, commands, executed: true })
    }

    /// Re-run the most recently undone entry verbatim.
    ///
    /// Undoing `checkout -b` or `branch -m` removes the ref the entry was
    /// logged on. When the current ref has nothing to redo, the undone run at
    /// the top of the whole log is used if its target's ref is gone.
    pub fn redo(&self) -> anyhow::Result<RedoReport> {
        let scope = self.scope()?;
        let mut run = self.log.undone_run(scope.as_deref())?;
        if run.is_empty() && scope.is_some() {
            let anywhere = self.log.undone_run(None)?;
            if let Some(e) = anywhere.last() {
                if !state::rev_exists(&self.git, &e.reference) {
                    debug!(command = %e.command, reference = %e.reference, "redo target's ref is gone");
                    run = anywhere;
                }
            }
        }
        let Some(target) = run.last() else {
            return Err(nothing_to("redo", scope.as_deref()).into());
        };
        if run.len() > 1 {
            let newer: Vec<&str> = run[..run.len() - 1].iter().map(|e| e.command.as_str()).collect();
            return Err(UndoError::state(format!(
                "ambiguous redo: `{}` was undone, but newer undone entries sit ahead of it ({})",
                target.command,
                newer.join("; ")
            ))
            .into());
        }
        if self.options.dry_run {
            return Ok(RedoReport { entry: target.clone(), executed: false });
        }

        let live = self.log.toggle(target)?;
        if let Err(e) = self.replay(&live.command) {
            self.log.toggle(&live)?;
            return Err(e.into());
        }
        info!(command = %live.command, "redone");
        Ok(RedoReport { entry: live, executed: true })
    }

    // ── Navigation ──

    /// Return to the previously checked-out ref.
    pub fn back(&self) -> anyhow::Result<BackReport> {
        let entry = if self.options.track_navigation {
            let scope = self.scope()?;
            self.log.last_navigation(scope.as_deref())?
        } else {
            None
        };
        let commands = match &entry {
            Some(e) => self.plan(e)?,
            None => plan_back(&self.git)?,
        };
        if self.options.dry_run {
            return Ok(BackReport { entry, commands, executed: false });
        }

        self.execute(&commands)?;
        let entry = match entry {
            Some(e) => Some(self.log.toggle(&e)?),
            None => None,
        };
        Ok(BackReport { entry, commands, executed: true })
    }

    // ── Execution ──

    fn plan(&self, entry: &LogEntry) -> Result<Vec<UndoCommand>, UndoError> {
        let parsed = parse_command(&entry.command)?;
        let details = CommandDetails::new(&entry.command, &parsed)
            .with_recorded_at(entry.timestamp.unix_timestamp());
        Strategy::for_details(&details).plan(&details, &self.git)
    }

    /// Run `commands` in order, stopping at the first failure.
    fn execute(&self, commands: &[UndoCommand]) -> Result<(), UndoError> {
        for (i, cmd) in commands.iter().enumerate() {
            let args: Vec<&str> = cmd.verb_args().iter().map(String::as_str).collect();
            debug!(command = %cmd.command, step = i + 1, total = commands.len(), "running");
            if let Err(e) = self.git.run(cmd.verb(), &args) {
                return Err(UndoError::Execution {
                    command: cmd.command.clone(),
                    completed: i,
                    total: commands.len(),
                    message: e.stderr,
                });
            }
        }
        Ok(())
    }

    /// Run a recorded command line again, global options included.
    fn replay(&self, raw: &str) -> Result<(), UndoError> {
        let tokens = shlex::split(raw).ok_or_else(|| UndoError::parse(raw, "unbalanced quotes"))?;
        let argv: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        let Some((verb, args)) = argv.split_first() else {
            return Err(UndoError::parse(raw, "no git verb"));
        };
        debug!(command = raw, "replaying");
        self.git.run(verb, args).map_err(|e| UndoError::Execution {
            command: raw.to_string(),
            completed: 0,
            total: 1,
            message: e.stderr,
        })
    }
}

fn nothing_to(action: &str, scope: Option<&str>) -> UndoError {
    match scope {
        Some(r) => UndoError::state(format!("nothing to {action} on '{r}'")),
        None => UndoError::state(format!("nothing to {action}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGit;

    fn committed(branch: &str) -> ScriptedGit {
        ScriptedGit::new()
            .on_branch(branch)
            .with_rev("HEAD")
            .with_rev("HEAD~1")
            .with("rev-list --parents -n 1 HEAD", "c p\n")
            .with(&format!("reflog show -1 --format=%gs refs/heads/{branch}"), "commit: work\n")
            .with("tag --points-at HEAD", "")
    }

    fn setup(git: ScriptedGit) -> (tempfile::TempDir, Orchestrator<ScriptedGit>) {
        let tmp = tempfile::tempdir().unwrap();
        let log = CommandLog::at(tmp.path().join("commands"));
        (tmp, Orchestrator::new(git, log, Options::default()))
    }

    fn undo_error(err: &anyhow::Error) -> &UndoError {
        err.downcast_ref::<UndoError>().expect("typed undo error")
    }

    #[test]
    fn read_only_and_own_commands_are_skipped() {
        let (_tmp, orch) = setup(committed("main"));
        assert!(matches!(orch.record("git status").unwrap(), LogOutcome::Skipped));
        assert!(matches!(orch.record("git undo").unwrap(), LogOutcome::Skipped));
        assert!(matches!(orch.record("git branch -a").unwrap(), LogOutcome::Skipped));
        assert!(orch.log().entries().unwrap().is_empty());
    }

    #[test]
    fn parse_errors_write_nothing() {
        let (_tmp, orch) = setup(committed("main"));
        assert!(orch.record("ls -la").is_err());
        assert!(orch.log().entries().unwrap().is_empty());
    }

    #[test]
    fn undo_commit_soft_resets_and_marks_entry() {
        let (_tmp, orch) = setup(committed("main"));
        orch.record("git commit -m 'add feature'").unwrap();

        let report = orch.undo().unwrap();
        assert!(report.executed);
        assert_eq!(report.commands[0].command, "git reset --soft HEAD~1");
        assert_eq!(orch.git.ran(), vec!["reset --soft HEAD~1"]);

        let entries = orch.log().entries().unwrap();
        assert!(entries[0].undone);
        assert_eq!(entries[0].command, "git commit -m 'add feature'");
    }

    #[test]
    fn missing_tag_fails_without_running_or_toggling() {
        let (_tmp, orch) = setup(committed("main"));
        orch.record("git tag v1.0.0").unwrap();

        let err = orch.undo().unwrap_err();
        assert!(undo_error(&err).is_state());
        assert!(err.to_string().contains("v1.0.0"));
        assert!(orch.git.ran().is_empty());
        assert!(!orch.log().entries().unwrap()[0].undone);
    }

    #[test]
    fn partial_failure_stops_before_remaining_steps() {
        let git = committed("main")
            .with("ls-files --error-unmatch -- dir/a.txt", "x\n")
            .with("ls-files --error-unmatch -- dir/b.txt", "x\n")
            .with("ls-files --error-unmatch -- dir/c.txt", "x\n")
            .run_fails("mv dir/b.txt b.txt");
        let (_tmp, orch) = setup(git);
        orch.record("git mv a.txt b.txt c.txt dir").unwrap();

        let err = orch.undo().unwrap_err();
        match undo_error(&err) {
            UndoError::Execution { completed, total, command, .. } => {
                assert_eq!((*completed, *total), (1, 3));
                assert_eq!(command, "git mv dir/b.txt b.txt");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(orch.git.ran(), vec!["mv dir/a.txt a.txt", "mv dir/b.txt b.txt"]);
        assert!(!orch.log().entries().unwrap()[0].undone);
    }

    #[test]
    fn dry_run_plans_only() {
        let tmp = tempfile::tempdir().unwrap();
        let log = CommandLog::at(tmp.path().join("commands"));
        let opts = Options { dry_run: true, ..Options::default() };
        let orch = Orchestrator::new(committed("main"), log, opts);
        orch.record("git commit -m x").unwrap();

        let report = orch.undo().unwrap();
        assert!(!report.executed);
        assert_eq!(report.commands.len(), 1);
        assert!(orch.git.ran().is_empty());
        assert!(!orch.log().entries().unwrap()[0].undone);
    }

    #[test]
    fn redo_replays_and_restores_entry() {
        let (_tmp, orch) = setup(committed("main"));
        orch.record("git commit -m 'add feature'").unwrap();
        orch.undo().unwrap();

        let report = orch.redo().unwrap();
        assert!(!report.entry.undone);
        assert_eq!(
            orch.git.ran(),
            vec!["reset --soft HEAD~1", "commit -m add feature"]
        );
        assert!(!orch.log().entries().unwrap()[0].undone);
    }

    #[test]
    fn failed_redo_keeps_entry_undone() {
        let git = committed("main").run_fails("commit -m x");
        let (_tmp, orch) = setup(git);
        orch.record("git commit -m x").unwrap();
        orch.undo().unwrap();

        assert!(orch.redo().is_err());
        assert!(orch.log().entries().unwrap()[0].undone);
    }

    #[test]
    fn redo_refuses_when_several_entries_are_undone() {
        let (_tmp, orch) = setup(committed("main"));
        orch.record("git commit -m one").unwrap();
        orch.record("git commit -m two").unwrap();
        orch.undo().unwrap();
        orch.undo().unwrap();

        let err = orch.redo().unwrap_err();
        assert!(undo_error(&err).is_state());
        assert!(err.to_string().contains("ambiguous"));
    }

    fn log_with_undone(path: &std::path::Path, reference: &str, command: &str) {
        let log = CommandLog::at(path);
        log.append(&LogEntry::new(reference, command)).unwrap();
        let top = log.last_regular(None).unwrap().unwrap();
        log.toggle(&top).unwrap();
    }

    #[test]
    fn redo_follows_entry_whose_ref_was_removed_by_undo() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("commands");
        log_with_undone(&path, "feat", "git checkout -b feat");

        let orch = Orchestrator::new(committed("main"), CommandLog::at(&path), Options::default());
        let report = orch.redo().unwrap();
        assert_eq!(report.entry.command, "git checkout -b feat");
        assert_eq!(orch.git.ran(), vec!["checkout -b feat"]);
        assert!(!orch.log().entries().unwrap()[0].undone);
    }

    #[test]
    fn redo_does_not_replay_another_live_branch_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("commands");
        log_with_undone(&path, "feature", "git commit -m wip");

        let orch = Orchestrator::new(
            committed("main").with_rev("feature"),
            CommandLog::at(&path),
            Options::default(),
        );
        let err = orch.redo().unwrap_err();
        assert!(err.to_string().contains("nothing to redo on 'main'"));
        assert!(orch.git.ran().is_empty());
    }

    #[test]
    fn empty_stash_entry_does_not_touch_older_stash() {
        let git = committed("main")
            .with("stash list", "stash@{0}: WIP on main: older work\n")
            .with("log -1 --format=%ct stash@{0}", "1000000000\n");
        let (_tmp, orch) = setup(git);
        orch.record("git stash").unwrap();

        let err = orch.undo().unwrap_err();
        assert!(undo_error(&err).is_state());
        assert!(orch.git.ran().is_empty());
        assert!(!orch.log().entries().unwrap()[0].undone);
    }

    #[test]
    fn nothing_to_redo_is_a_state_error() {
        let (_tmp, orch) = setup(committed("main"));
        orch.record("git commit -m one").unwrap();
        let err = orch.redo().unwrap_err();
        assert!(err.to_string().contains("nothing to redo"));
    }

    #[test]
    fn new_command_after_undo_truncates() {
        let (_tmp, orch) = setup(committed("main"));
        orch.record("git commit -m one").unwrap();
        orch.undo().unwrap();

        match orch.record("git commit -m two").unwrap() {
            LogOutcome::Logged { truncated, .. } => {
                assert_eq!(truncated.len(), 1);
                assert_eq!(truncated[0].command, "git commit -m one");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(orch.log().entries().unwrap().len(), 1);
    }

    #[test]
    fn undo_is_scoped_to_current_branch() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("commands");
        let on_feature = Orchestrator::new(committed("feature"), CommandLog::at(&path), Options::default());
        on_feature.record("git commit -m wip").unwrap();

        let on_main = Orchestrator::new(committed("main"), CommandLog::at(&path), Options::default());
        let err = on_main.undo().unwrap_err();
        assert!(err.to_string().contains("nothing to undo on 'main'"));

        let unscoped = Options { branch_scoped: false, ..Options::default() };
        let anywhere = Orchestrator::new(committed("main"), CommandLog::at(&path), unscoped);
        assert!(anywhere.undo().is_ok());
    }

    #[test]
    fn unsupported_command_is_a_barrier() {
        let (_tmp, orch) = setup(committed("main"));
        orch.record("git commit -m one").unwrap();
        match orch.record("git push origin main").unwrap() {
            LogOutcome::LoggedNotUndoable { reason, .. } => assert!(reason.is_unsupported()),
            other => panic!("unexpected outcome: {other:?}"),
        }

        let err = orch.undo().unwrap_err();
        assert!(undo_error(&err).is_unsupported());
        assert!(orch.git.ran().is_empty());
    }

    #[test]
    fn back_walks_navigation_entry() {
        let git = committed("feature")
            .with("rev-parse --abbrev-ref @{-1}", "main\n")
            .clean_tree();
        let (_tmp, orch) = setup(git);
        orch.record("git checkout feature").unwrap();

        let report = orch.back().unwrap();
        assert_eq!(orch.git.ran(), vec!["checkout -"]);
        assert!(report.entry.is_some_and(|e| e.undone));
    }

    #[test]
    fn back_without_history_uses_previous_ref() {
        let git = committed("feature")
            .with("rev-parse --abbrev-ref @{-1}", "main\n")
            .clean_tree();
        let (_tmp, orch) = setup(git);
        let report = orch.back().unwrap();
        assert!(report.entry.is_none());
        assert_eq!(report.commands[0].command, "git checkout -");
    }

    #[test]
    fn navigation_is_not_undone_by_undo() {
        let (_tmp, orch) = setup(committed("main"));
        orch.record("git checkout main").unwrap();
        let err = orch.undo().unwrap_err();
        assert!(err.to_string().contains("nothing to undo"));
    }
}
