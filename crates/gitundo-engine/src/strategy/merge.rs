use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

// ── merge ──

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(&["--abort", "--continue", "--quit"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "it only steers a merge in progress",
        ));
    }
    Ok(())
}

pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    if state::rev_exists(git, "MERGE_HEAD") {
        return Ok(vec![UndoCommand::new(
            owned(&["merge", "--abort"]),
            "abort the merge in progress",
        )]);
    }

    if d.has_flag(&["--squash"]) {
        let cmd = UndoCommand::new(
            owned(&["reset", "--merge", "HEAD"]),
            "drop the squashed changes from the index and working tree",
        )
        .with_warning("local edits to files touched by the squash are discarded as well");
        return Ok(vec![cmd]);
    }

    if !state::rev_exists(git, "ORIG_HEAD") {
        return Err(UndoError::state(
            "ORIG_HEAD is missing; cannot find where HEAD was before the merge",
        ));
    }

    if state::head_parent_count(git)? >= 2 {
        let cmd = UndoCommand::new(
            owned(&["reset", "--merge", "ORIG_HEAD"]),
            "remove the merge commit and return to the pre-merge state",
        )
        .with_warning("conflict resolutions made for this merge are lost");
        return Ok(vec![cmd]);
    }

    let subject = state::reflog_subject(git);
    if !subject.starts_with("merge") {
        return Err(UndoError::state(format!(
            "HEAD was last moved by \"{subject}\", not by a merge; nothing to undo"
        )));
    }
    // Fast-forward: no merge commit, HEAD simply moved.
    let cmd = UndoCommand::new(
        owned(&["reset", "--hard", "ORIG_HEAD"]),
        "move the branch back to where it was before the fast-forward",
    )
    .with_warnings(state::discard_warnings(git, "reset --hard")?);
    Ok(vec![cmd])
}

// ── rebase ──

pub(super) fn check_rebase(d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(&["--abort", "--continue", "--skip", "--quit", "--edit-todo"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "it only steers a rebase in progress",
        ));
    }
    Ok(())
}

pub(super) fn plan_rebase(
    _d: &CommandDetails,
    git: &dyn GitInspector,
) -> Result<Vec<UndoCommand>, UndoError> {
    if state::rev_exists(git, "REBASE_HEAD") {
        return Ok(vec![UndoCommand::new(
            owned(&["rebase", "--abort"]),
            "abort the rebase in progress",
        )]);
    }
    if !state::rev_exists(git, "ORIG_HEAD") {
        return Err(UndoError::state(
            "ORIG_HEAD is missing; cannot find where the branch was before the rebase",
        ));
    }
    let subject = state::reflog_subject(git);
    if !subject.starts_with("rebase") {
        return Err(UndoError::state(format!(
            "HEAD was last moved by \"{subject}\", not by a rebase; nothing to undo"
        )));
    }
    let cmd = UndoCommand::new(
        owned(&["reset", "--hard", "ORIG_HEAD"]),
        "move the branch back to where it was before the rebase",
    )
    .with_warnings(state::discard_warnings(git, "reset --hard")?);
    Ok(vec![cmd])
}
