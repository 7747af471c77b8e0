use super::with_paths;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

// ── restore ──

const RESTORE_VALUE_FLAGS: &[&str] = &["-s", "--source"];

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    if !d.has_flag(&["-S", "--staged"]) || d.has_flag(&["-W", "--worktree"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "working-tree content overwritten by restore is not recoverable",
        ));
    }
    if d.has_flag(&["-s", "--source"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "the index content replaced from another source is not recorded",
        ));
    }
    if d.has_flag(&["-p", "--patch"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "the hunks chosen interactively are not recorded",
        ));
    }
    if d.operands_skipping(RESTORE_VALUE_FLAGS).is_empty() {
        return Err(UndoError::unsupported(&d.full_command, "no paths given"));
    }
    Ok(())
}

/// `restore --staged <files>` is undone by staging them again.
pub(super) fn plan(d: &CommandDetails, _git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let files = d.operands_skipping(RESTORE_VALUE_FLAGS);
    Ok(vec![UndoCommand::new(
        with_paths(&["add"], &files),
        format!("stage {} again", files.join(", ")),
    )
    .with_warning("files edited since the restore are staged with their current content")])
}

// ── rm ──

pub(super) fn check_rm(d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(&["-n", "--dry-run"]) {
        return Err(UndoError::unsupported(&d.full_command, "a dry run removed nothing"));
    }
    if d.has_flag(&["--pathspec-from-file"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "the removed paths were read from a file that may have changed",
        ));
    }
    if d.operands().is_empty() {
        return Err(UndoError::unsupported(&d.full_command, "no paths given"));
    }
    Ok(())
}

pub(super) fn plan_rm(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let files = d.operands();
    if d.has_flag(&["--cached"]) {
        return Ok(vec![UndoCommand::new(
            with_paths(&["add"], &files),
            format!("track {} again", files.join(", ")),
        )]);
    }
    if !state::has_head(git) {
        return Err(UndoError::state(
            "cannot restore removed files: the repository has no commits",
        ));
    }
    Ok(vec![UndoCommand::new(
        with_paths(
            &["restore", "--source=HEAD", "--staged", "--worktree"],
            &files,
        ),
        format!("restore {} from HEAD", files.join(", ")),
    )
    .with_warning("uncommitted edits the removed files had are not recovered")])
}
