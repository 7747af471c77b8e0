use super::owned;
use crate::inspector::GitInspector;
use crate::state;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

/// Flags whose value must not be mistaken for the tag name.
const VALUE_FLAGS: &[&str] = &["-m", "--message", "-F", "--file", "-u", "--local-user", "--cleanup"];

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(&["-d", "--delete"]) {
        return Err(UndoError::unsupported(
            &d.full_command,
            "a deleted tag cannot be restored; its target is not recorded",
        ));
    }
    if tag_name(d).is_none() {
        return Err(UndoError::unsupported(&d.full_command, "no tag name given"));
    }
    Ok(())
}

fn tag_name(d: &CommandDetails) -> Option<&str> {
    d.operands_skipping(VALUE_FLAGS).first().copied()
}

pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let Some(name) = tag_name(d) else {
        return Err(UndoError::unsupported(&d.full_command, "no tag name given"));
    };
    if !state::rev_exists(git, &format!("refs/tags/{name}")) {
        return Err(UndoError::state(format!("tag '{name}' does not exist")));
    }
    let mut cmd = UndoCommand::new(owned(&["tag", "-d", name]), format!("delete tag '{name}'"));
    if d.has_flag(&["-f", "--force"]) {
        cmd = cmd.with_warning(format!(
            "if '{name}' replaced an existing tag, the old target is not restored"
        ));
    }
    Ok(vec![cmd])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::details;
    use crate::testing::ScriptedGit;

    #[test]
    fn existing_tag_is_deleted() {
        let git = ScriptedGit::new().with_rev("refs/tags/v1.0.0");
        let plan = plan(&details("git tag v1.0.0"), &git).unwrap();
        assert_eq!(plan[0].command, "git tag -d v1.0.0");
    }

    #[test]
    fn message_value_is_not_the_name() {
        let git = ScriptedGit::new().with_rev("refs/tags/v2");
        let plan = plan(&details("git tag -a -m 'release two' v2"), &git).unwrap();
        assert_eq!(plan[0].command, "git tag -d v2");
    }

    #[test]
    fn missing_tag_names_it() {
        let git = ScriptedGit::new();
        let err = plan(&details("git tag v1.0.0"), &git).unwrap_err();
        assert!(err.is_state());
        assert!(err.to_string().contains("v1.0.0"));
        assert!(git.ran().is_empty());
    }

    #[test]
    fn delete_is_unsupported() {
        assert!(check(&details("git tag -d v1")).unwrap_err().is_unsupported());
    }
}
