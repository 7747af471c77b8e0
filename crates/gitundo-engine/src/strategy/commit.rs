use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    if !state::has_head(git) {
        return Err(UndoError::state("there is no commit to undo: HEAD does not exist"));
    }
    if !state::rev_exists(git, "HEAD~1") {
        return Err(UndoError::state(
            "cannot undo the initial commit: HEAD has no parent",
        ));
    }

    if state::head_parent_count(git)? >= 2 {
        if !state::rev_exists(git, "ORIG_HEAD") {
            return Err(UndoError::state(
                "HEAD is a merge commit but ORIG_HEAD is missing; cannot find the pre-merge state",
            ));
        }
        let cmd = UndoCommand::new(
            owned(&["reset", "--merge", "ORIG_HEAD"]),
            "return to the state before the merge this commit concluded",
        )
        .with_warning("the whole merge is undone, including any conflict resolutions");
        return Ok(vec![cmd]);
    }

    // The branch's own reflog; HEAD's also records every checkout.
    let reflog = state::reflog_ref(git);
    let subject = state::ref_reflog_subject(git, &reflog);
    if subject.starts_with("commit (amend)") {
        let Some(before) = state::previous_position(git, &reflog) else {
            return Err(UndoError::state(format!(
                "the reflog of {reflog} has no entry before the amend"
            )));
        };
        let short = &before[..before.len().min(7)];
        return Ok(vec![UndoCommand::new(
            owned(&["reset", "--soft", before.as_str()]),
            format!("restore the commit as it was before --amend ({short}), keeping changes staged"),
        )]);
    }
    if d.has_flag(&["--amend"]) {
        return Err(UndoError::state(format!(
            "the newest reflog entry of {reflog} is not the amend (found `{subject}`); \
             the branch moved since"
        )));
    }

    let mut cmd = UndoCommand::new(
        owned(&["reset", "--soft", "HEAD~1"]),
        "remove the last commit, keeping its changes staged",
    );
    let tags = state::lines(git, "tag", &["--points-at", "HEAD"]).unwrap_or_default();
    if !tags.is_empty() {
        cmd = cmd.with_warning(format!(
            "tag(s) {} point at the undone commit and will not follow HEAD to its parent",
            state::preview(&tags)
        ));
    }
    Ok(vec![cmd])
}
