use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

const VALUE_FLAGS: &[&str] = &["-t", "-m"];

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    let ops = d.operands_skipping(VALUE_FLAGS);
    match ops.as_slice() {
        ["add", _name, ..] => Ok(()),
        ["rename", _old, _new] => Ok(()),
        ["remove" | "rm", ..] => Err(UndoError::unsupported(
            &d.full_command,
            "the removed remote's configuration is not recorded",
        )),
        [sub, ..] => Err(UndoError::unsupported(
            &d.full_command,
            format!("the previous state changed by `remote {sub}` is not recorded"),
        )),
        [] => Err(UndoError::unsupported(&d.full_command, "no remote subcommand given")),
    }
}

pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let ops = d.operands_skipping(VALUE_FLAGS);
    let remotes = state::lines(git, "remote", &[])?;
    let require = |name: &str| {
        if remotes.iter().any(|r| r == name) {
            Ok(())
        } else {
            Err(UndoError::state(format!("remote '{name}' does not exist")))
        }
    };
    match ops.as_slice() {
        ["add", name, ..] => {
            let name = *name;
            require(name)?;
            Ok(vec![UndoCommand::new(
                owned(&["remote", "remove", name]),
                format!("remove remote '{name}'"),
            )
            .with_warning(format!("remote-tracking branches fetched from '{name}' are deleted too"))])
        }
        ["rename", old, new] => {
            let (old, new) = (*old, *new);
            require(new)?;
            Ok(vec![UndoCommand::new(
                owned(&["remote", "rename", new, old]),
                format!("rename remote '{new}' back to '{old}'"),
            )])
        }
        _ => check(d).map(|_| Vec::new()),
    }
}
