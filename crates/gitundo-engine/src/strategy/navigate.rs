use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    plan_previous(&d.verb, git)
}

/// `<verb> -` back to `@{-1}`, with warnings about local changes that the
/// switch would carry along.
pub(super) fn plan_previous(verb: &str, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let Some(previous) = state::previous_ref(git) else {
        return Err(UndoError::state("there is no previously checked-out branch to return to"));
    };
    let cmd = UndoCommand::new(owned(&[verb, "-"]), format!("switch back to '{previous}'"))
        .with_warnings(carry_warnings(git, &previous)?);
    Ok(vec![cmd])
}

pub(super) fn carry_warnings(git: &dyn GitInspector, target: &str) -> Result<Vec<String>, UndoError> {
    let mut warnings = Vec::new();
    let staged = state::staged_files(git)?;
    if !staged.is_empty() {
        warnings.push(format!(
            "{} staged file(s) will be carried to '{target}' ({}); run `git stash` first if the switch fails",
            staged.len(),
            state::preview(&staged)
        ));
    }
    let unstaged = state::unstaged_files(git)?;
    if !unstaged.is_empty() {
        warnings.push(format!(
            "{} modified file(s) will be carried to '{target}' ({}); run `git stash` first if the switch fails",
            unstaged.len(),
            state::preview(&unstaged)
        ));
    }
    let untracked = state::untracked_files(git)?;
    if !untracked.is_empty() {
        warnings.push(format!(
            "{} untracked file(s) stay in the working tree ({}); `git stash -u` keeps them apart",
            untracked.len(),
            state::preview(&untracked)
        ));
    }
    Ok(warnings)
}
