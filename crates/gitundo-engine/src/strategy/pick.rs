use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};
use regex::Regex;
use std::sync::OnceLock;

/// `revert` and `cherry-pick` share one strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickKind {
    Revert,
    CherryPick,
}

impl PickKind {
    fn verb(self) -> &'static str {
        match self {
            PickKind::Revert => "revert",
            PickKind::CherryPick => "cherry-pick",
        }
    }

    /// Pseudo-ref present while a conflicted pick is stopped.
    fn in_progress_ref(self) -> &'static str {
        match self {
            PickKind::Revert => "REVERT_HEAD",
            PickKind::CherryPick => "CHERRY_PICK_HEAD",
        }
    }
}

const SEQUENCER_FLAGS: &[&str] = &["--abort", "--continue", "--skip", "--quit"];
const VALUE_FLAGS: &[&str] = &["-m", "--mainline", "-X", "--strategy-option", "--strategy"];

pub(super) fn check(kind: PickKind, d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(SEQUENCER_FLAGS) {
        return Err(UndoError::unsupported(
            &d.full_command,
            format!("`{} --abort/--continue/--skip/--quit` only steers an operation in progress", kind.verb()),
        ));
    }
    let commits = d.operands_skipping(VALUE_FLAGS);
    if commits.iter().any(|c| c.contains("..")) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "the number of commits in a range is not recorded",
        ));
    }
    if commits.is_empty() {
        return Err(UndoError::unsupported(&d.full_command, "no commit given"));
    }
    Ok(())
}

pub(super) fn plan(
    kind: PickKind,
    d: &CommandDetails,
    git: &dyn GitInspector,
) -> Result<Vec<UndoCommand>, UndoError> {
    if state::rev_exists(git, kind.in_progress_ref()) {
        return Ok(vec![UndoCommand::new(
            owned(&[kind.verb(), "--abort"]),
            format!("abort the {} that stopped on a conflict", kind.verb()),
        )]);
    }

    if d.has_flag(&["-n", "--no-commit"]) {
        return Ok(vec![UndoCommand::new(
            owned(&["restore", "--staged", "--", "."]),
            format!("unstage the changes applied by {} --no-commit", kind.verb()),
        )
        .with_warning("the working tree keeps the applied changes; `git restore .` discards them")]);
    }

    if !looks_like(kind, git) {
        let subject = state::first_line(git, "log", &["-1", "--format=%s"]).unwrap_or_default();
        return Err(UndoError::state(format!(
            "HEAD does not look like a {} commit (subject: \"{subject}\"); refusing to guess what to remove",
            kind.verb()
        )));
    }

    let count = d.operands_skipping(VALUE_FLAGS).len();
    let target = format!("HEAD~{count}");
    if !state::rev_exists(git, &target) {
        return Err(UndoError::state(format!(
            "{target} does not exist; history is shorter than the recorded {}",
            kind.verb()
        )));
    }
    let hash = state::first_line(git, "rev-parse", &[target.as_str()])?;
    Ok(vec![UndoCommand::new(
        owned(&["reset", "--keep", hash.as_str()]),
        format!("remove the {count} commit(s) created by {}", kind.verb()),
    )])
}

/// HEAD message or reflog carries the marker `kind` leaves behind.
fn looks_like(kind: PickKind, git: &dyn GitInspector) -> bool {
    static REVERT: OnceLock<Option<Regex>> = OnceLock::new();
    static PICKED: OnceLock<Option<Regex>> = OnceLock::new();

    if state::reflog_subject(git).starts_with(kind.verb()) {
        return true;
    }
    let message = git.output("log", &["-1", "--format=%B"]).unwrap_or_default();
    let pattern = match kind {
        PickKind::Revert => REVERT.get_or_init(|| Regex::new(r#"(?m)^Revert ".*"$"#).ok()),
        PickKind::CherryPick => PICKED.get_or_init(|| {
            Regex::new(r"\(cherry picked from commit [0-9a-f]{7,64}\)").ok()
        }),
    };
    pattern.as_ref().is_some_and(|re| re.is_match(&message))
}
