use super::owned;
use crate::inspector::GitInspector;
use gitundo_core::{CommandDetails, UndoCommand, UndoError};

pub(super) fn check(d: &CommandDetails) -> Result<(), UndoError> {
    if d.has_flag(&["-n", "--dry-run"]) {
        return Err(UndoError::unsupported(&d.full_command, "a dry run moved nothing"));
    }
    if d.operands().len() < 2 {
        return Err(UndoError::unsupported(
            &d.full_command,
            "expected at least a source and a destination",
        ));
    }
    Ok(())
}

/// One `mv <dest> <source>` per moved path, each checked against the index.
pub(super) fn plan(d: &CommandDetails, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let operands = d.operands();
    let (dest, sources) = match operands.split_last() {
        Some((dest, sources)) => (*dest, sources),
        None => return Err(UndoError::unsupported(&d.full_command, "no paths given")),
    };

    let mut plan = Vec::with_capacity(sources.len());
    if sources.len() == 1 && !dest.ends_with('/') {
        let source = sources[0];
        let inside = join(dest, basename(source));
        // `git mv a.txt dir` moves into an existing directory.
        let moved_to = if tracked(git, &inside) {
            inside
        } else if tracked(git, dest) {
            dest.to_string()
        } else {
            return Err(missing(dest));
        };
        plan.push(inverse(&moved_to, source));
        return Ok(plan);
    }

    for source in sources {
        let moved_to = join(dest, basename(source));
        if !tracked(git, &moved_to) {
            return Err(missing(&moved_to));
        }
        plan.push(inverse(&moved_to, source));
    }
    Ok(plan)
}

fn inverse(moved_to: &str, source: &str) -> UndoCommand {
    UndoCommand::new(
        owned(&["mv", moved_to, source]),
        format!("move '{moved_to}' back to '{source}'"),
    )
}

fn tracked(git: &dyn GitInspector, path: &str) -> bool {
    git.output("ls-files", &["--error-unmatch", "--", path]).is_ok()
}

fn missing(path: &str) -> UndoError {
    UndoError::state(format!(
        "'{path}' is not in the index; it was moved or removed after the recorded mv"
    ))
}

fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

fn join(dir: &str, name: &str) -> String {
    format!("{}/{name}", dir.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::details;
    use crate::testing::ScriptedGit;

    #[test]
    fn rename_is_swapped() {
        let git = ScriptedGit::new().with("ls-files --error-unmatch -- new.txt", "new.txt\n");
        let plan = plan(&details("git mv old.txt new.txt"), &git).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].command, "git mv new.txt old.txt");
    }

    #[test]
    fn move_into_directory_targets_basename() {
        let git = ScriptedGit::new()
            .with("ls-files --error-unmatch -- docs/readme.md", "docs/readme.md\n")
            .with("ls-files --error-unmatch -- docs", "docs/readme.md\n");
        let plan = plan(&details("git mv src/readme.md docs"), &git).unwrap();
        assert_eq!(plan[0].command, "git mv docs/readme.md src/readme.md");
    }

    #[test]
    fn multi_source_yields_one_command_each() {
        let git = ScriptedGit::new()
            .with("ls-files --error-unmatch -- dir/a.txt", "dir/a.txt\n")
            .with("ls-files --error-unmatch -- dir/b.txt", "dir/b.txt\n");
        let plan = plan(&details("git mv a.txt lib/b.txt dir/"), &git).unwrap();
        let cmds: Vec<_> = plan.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(cmds, vec!["git mv dir/a.txt a.txt", "git mv dir/b.txt lib/b.txt"]);
    }

    #[test]
    fn missing_destination_is_a_state_error() {
        let git = ScriptedGit::new();
        let err = plan(&details("git mv old.txt new.txt"), &git).unwrap_err();
        assert!(err.is_state());
        assert!(err.to_string().contains("new.txt"));
    }

    #[test]
    fn single_operand_is_unsupported() {
        assert!(check(&details("git mv a.txt")).unwrap_err().is_unsupported());
    }

    #[test]
    fn quoted_names_survive() {
        let git = ScriptedGit::new().with("ls-files --error-unmatch -- new name.txt", "x\n");
        let plan = plan(&details("git mv old.txt 'new name.txt'"), &git).unwrap();
        assert_eq!(plan[0].command, "git mv 'new name.txt' old.txt");
    }
}
