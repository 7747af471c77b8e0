use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{is_flag, CommandDetails, UndoCommand, UndoError};

const DELETE_FLAGS: &[&str] = &["-d", "-D", "--delete"];
const UPSTREAM_FLAGS: &[&str] = &[
    "-u",
    "--set-upstream-to",
    "--unset-upstream",
    "--edit-description",
];
const MOVE_FLAGS: &[&str] = &["-m", "-M", "--move"];
const COPY_FLAGS: &[&str] = &["-c", "-C", "--copy"];
const VALUE_FLAGS: &[&str] = &["-u", "--set-upstream-to", "--contains", "--points-at"];

/// Create flags of `checkout` and `switch`.
const CREATE_FLAGS: &[&str] = &["-b", "-B", "-c", "-C", "--orphan", "--create", "--force-create"];

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(DELETE_FLAGS) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "a deleted branch cannot be restored; its tip commit is not recorded",
        ));
    }
    if d.has_flag(&["-f", "--force"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "a forced update may have moved an existing branch whose old tip is not recorded",
        ));
    }
    if d.has_flag(UPSTREAM_FLAGS) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "the previous branch configuration is not recorded",
        ));
    }
    let names = d.operands_skipping(VALUE_FLAGS);
    if d.has_flag(MOVE_FLAGS) && names.len() < 2 {
        return Err(UndoError::unsupported(
            &d.full_command,
            "the old name of the renamed current branch is not recorded",
        ));
    }
    if names.is_empty() {
        return Err(UndoError::unsupported(&d.full_command, "no branch name given"));
    }
    Ok(())
}

pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let names = d.operands_skipping(VALUE_FLAGS);

    if d.has_flag(MOVE_FLAGS) {
        let (old, new) = (names[0], names[1]);
        require_branch(git, new)?;
        return Ok(vec![UndoCommand::new(
            owned(&["branch", "-m", new, old]),
            format!("rename branch '{new}' back to '{old}'"),
        )]);
    }

    // `branch <new> [<start>]`, `branch -c [<src>] <new>`
    let created = if d.has_flag(COPY_FLAGS) {
        names[names.len().min(2) - 1]
    } else {
        names[0]
    };
    require_branch(git, created)?;
    Ok(vec![UndoCommand::new(
        owned(&["branch", "-D", created]),
        format!("delete branch '{created}'"),
    )])
}

fn require_branch(git: &dyn GitInspector, name: &str) -> Result<(), UndoError> {
    if state::rev_exists(git, &format!("refs/heads/{name}")) {
        Ok(())
    } else {
        Err(UndoError::state(format!("branch '{name}' does not exist")))
    }
}

/// Branch created by `checkout -b <name>` / `switch -c <name>`, if any.
pub(super) fn created_branch(d: &CommandDetails) -> Option<&str> {
    let mut iter = d.args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            return None;
        }
        if CREATE_FLAGS.contains(&arg.as_str()) {
            return iter.next().map(String::as_str).filter(|n| !is_flag(n));
        }
        for flag in ["--orphan", "--create", "--force-create"] {
            if let Some(v) = arg.strip_prefix(&format!("{flag}=")) {
                return Some(v);
            }
        }
    }
    None
}

pub(super) fn check_create(d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(&["-B", "-C", "--force-create"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "a force-create may have reset an existing branch whose old tip is not recorded",
        ));
    }
    if d.has_flag(&["--orphan"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "an orphan branch has no commits to delete until its first commit",
        ));
    }
    Ok(())
}

pub(super) fn plan_create(
    d: &CommandDetails,
    git: &dyn GitInspector,
) -> Result<Vec<UndoCommand>, UndoError> {
    let Some(name) = created_branch(d) else {
        return Err(UndoError::unsupported(&d.full_command, "no branch name given"));
    };
    let mut plan = Vec::new();
    if state::current_ref(git)? == name {
        let Some(previous) = state::previous_ref(git) else {
            return Err(UndoError::state(format!(
                "cannot leave '{name}': there is no previously checked-out branch"
            )));
        };
        plan.push(
            UndoCommand::new(
                owned(&[d.verb.as_str(), previous.as_str()]),
                format!("switch back to '{previous}'"),
            )
            .with_warnings(super::navigate::carry_warnings(git, &previous)?),
        );
    }
    plan.push(UndoCommand::new(
        owned(&["branch", "-D", name]),
        format!("delete branch '{name}'"),
    ));
    Ok(plan)
}
