use gitundo_core::{CommandDetails, UndoError};

/// Never undoable. A dry run gets its own message since it deleted nothing.
pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    let reason = if d.has_flag(&["-n", "--dry-run"]) {
        "a dry run removed nothing, so there is nothing to undo"
    } else {
        "files removed by clean were untracked and git kept no copy of them"
    };
    Err(UndoError::unsupported(&d.full_command, reason))
}
