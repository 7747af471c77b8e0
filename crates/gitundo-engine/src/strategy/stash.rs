use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

const VALUE_FLAGS: &[&str] = &["-m", "--message", "--pathspec-from-file"];

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    match subcommand(d) {
        None | Some("push") | Some("save") => Ok(()),
        Some(other) => Err(UndoError::unsupported(
            &d.full_command,
            format!("only stash creation can be undone, not `stash {other}`"),
        )),
    }
}

fn subcommand(d: &CommandDetails) -> Option<&str> {
    d.operands_skipping(VALUE_FLAGS).first().copied()
}

/// How long a stash may predate the log entry of the command that made it.
const CREATION_SLACK_SECS: i64 = 60;

/// Re-apply the newest stash with its index, then drop it. The drop is a
/// separate step so a conflicting apply leaves the stash in place.
pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let stashes = state::lines(git, "stash", &["list"])?;
    if stashes.is_empty() {
        return Err(UndoError::state("the stash is empty; nothing to bring back"));
    }
    if let Some(recorded) = d.recorded_at {
        check_created_by(d, git, recorded)?;
    }
    Ok(vec![
        UndoCommand::new(
            owned(&["stash", "apply", "--index", "stash@{0}"]),
            "re-apply the most recent stash, including staged changes",
        ),
        UndoCommand::new(owned(&["stash", "drop", "stash@{0}"]), "drop the re-applied stash"),
    ])
}

/// `stash@{0}` must not predate the entry. A stash on a clean tree saves
/// nothing, and `stash@{0}` is then an older one. Newer is fine: redo
/// re-creates the stash after the entry was logged.
fn check_created_by(d: &CommandDetails, git: &dyn GitInspector, recorded: i64) -> Result<(), UndoError> {
    let created = state::first_line(git, "log", &["-1", "--format=%ct", "stash@{0}"])?
        .parse::<i64>()
        .map_err(|_| UndoError::state("cannot read the creation time of stash@{0}"))?;
    if created < recorded - CREATION_SLACK_SECS {
        return Err(UndoError::state(format!(
            "stash@{{0}} is older than `{}`, which saved nothing; leaving the stash alone",
            d.full_command
        )));
    }
    Ok(())
}
