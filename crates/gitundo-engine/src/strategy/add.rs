use super::with_paths;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

const VALUE_FLAGS: &[&str] = &["--chmod", "--pathspec-from-file"];

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(&["-n", "--dry-run"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "a dry run staged nothing",
        ));
    }
    if d.has_flag(&["--pathspec-from-file"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "the staged paths were read from a file that may have changed",
        ));
    }
    Ok(())
}

pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let files = d.operands_skipping(VALUE_FLAGS);
    let everything = files.is_empty() || d.has_flag(&["-A", "--all"]);
    let paths: Vec<&str> = if everything { vec!["."] } else { files };
    let what = if everything {
        "all staged changes".to_string()
    } else {
        paths.join(", ")
    };

    let cmd = if state::has_head(git) {
        UndoCommand::new(
            with_paths(&["restore", "--staged"], &paths),
            format!("unstage {what}"),
        )
    } else {
        // No commit to restore from: drop the paths from the index instead.
        UndoCommand::new(
            with_paths(&["rm", "-r", "--cached", "--quiet"], &paths),
            format!("unstage {what} (repository has no commits yet)"),
        )
    };
    let cmd = if everything {
        cmd.with_warning("everything staged is unstaged, including changes staged before this add")
    } else {
        cmd
    };
    Ok(vec![cmd])
}
