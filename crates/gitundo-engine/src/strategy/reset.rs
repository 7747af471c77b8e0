use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

const MODES: &[&str] = &["soft", "mixed", "hard", "keep", "merge"];

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    if !d.pathspecs().is_empty() || d.has_flag(&["-p", "--patch", "--pathspec-from-file"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "a path-limited reset changed only the index; use `git add` to restage",
        ));
    }
    Ok(())
}

/// Mode flag of the recorded reset; `mixed` when none was given.
pub(super) fn mode(d: &CommandDetails) -> &'static str {
    MODES
        .iter()
        .copied()
        .find(|m| {
            let flag = format!("--{m}");
            d.has_flag(&[flag.as_str()])
        })
        .unwrap_or("mixed")
}

/// Reset back to where the branch pointed before the reset, using the same
/// mode. Only valid while the reset is still the branch's newest move.
pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let reflog = state::reflog_ref(git);
    let subject = state::ref_reflog_subject(git, &reflog);
    if !subject.starts_with("reset: moving to") {
        return Err(UndoError::state(format!(
            "the newest reflog entry of {reflog} is not the reset (found `{subject}`); \
             the branch moved since"
        )));
    }
    let Some(previous) = state::previous_position(git, &reflog) else {
        return Err(UndoError::state(
            "insufficient history: the reflog has no entry before the reset",
        ));
    };
    let mode = mode(d);
    let short = &previous[..previous.len().min(7)];
    let flag = format!("--{mode}");
    let mut cmd = UndoCommand::new(
        owned(&["reset", flag.as_str(), previous.as_str()]),
        format!("move HEAD back to {short}, where it was before the reset"),
    );
    if mode == "hard" {
        cmd = cmd.with_warnings(state::discard_warnings(git, "reset --hard")?);
    }
    Ok(vec![cmd])
}
