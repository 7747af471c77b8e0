//! Per-verb undo strategies.
//!
//! [`Strategy::for_details`] picks a variant from the verb (and, for
//! `checkout`/`switch`, from its arguments). Every variant has a static
//! [`Strategy::check`] that rejects invocations with no safe inverse, and a
//! [`Strategy::plan`] that inspects the repository and returns the inverse
//! commands in execution order. Planning never mutates the repository.

mod add;
mod branch;
mod clean;
mod commit;
mod merge;
mod mv;
mod navigate;
mod pick;
mod remote;
mod reset;
mod restore;
mod stash;
mod tag;

use crate::inspector::GitInspector;
use gitundo_core::{parse_command, Behavior, CommandDetails, GitVerb, UndoCommand, UndoError};

pub use pick::PickKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Add,
    Branch,
    Clean,
    Commit,
    /// `checkout -b` / `switch -c`: go back, then delete the new branch.
    CreateBranch,
    Merge,
    Move,
    /// `checkout <ref>` / `switch <ref>`: return to `@{-1}`.
    Navigate,
    Pick(PickKind),
    Rebase,
    Remote,
    Remove,
    Reset,
    Restore,
    Stash,
    Tag,
    Unsupported(String),
}

impl Strategy {
    pub fn for_details(details: &CommandDetails) -> Strategy {
        let Some(verb) = GitVerb::from_name(&details.verb) else {
            return Strategy::Unsupported(format!("`{}` is not a known git command", details.verb));
        };
        match verb {
            GitVerb::Add => Strategy::Add,
            GitVerb::Branch => Strategy::Branch,
            GitVerb::Clean => Strategy::Clean,
            GitVerb::Commit => Strategy::Commit,
            GitVerb::Checkout | GitVerb::Switch => switch_strategy(details),
            GitVerb::Merge => Strategy::Merge,
            GitVerb::Mv => Strategy::Move,
            GitVerb::Revert => Strategy::Pick(PickKind::Revert),
            GitVerb::CherryPick => Strategy::Pick(PickKind::CherryPick),
            GitVerb::Rebase => Strategy::Rebase,
            GitVerb::Remote => Strategy::Remote,
            GitVerb::Rm => Strategy::Remove,
            GitVerb::Reset => Strategy::Reset,
            GitVerb::Restore => Strategy::Restore,
            GitVerb::Stash => Strategy::Stash,
            GitVerb::Tag => Strategy::Tag,
            GitVerb::Fetch | GitVerb::Pull | GitVerb::Push | GitVerb::Clone => {
                Strategy::Unsupported("it exchanges objects with another repository".into())
            }
            GitVerb::Submodule | GitVerb::Worktree => {
                Strategy::Unsupported("it changes state outside this working tree".into())
            }
            GitVerb::Init => Strategy::Unsupported("re-initializing is not reversible".into()),
            GitVerb::Config | GitVerb::Notes | GitVerb::SparseCheckout => {
                Strategy::Unsupported("the previous value is not recorded".into())
            }
            other => Strategy::Unsupported(format!("no undo is defined for `git {other}`")),
        }
    }

    /// Static screening from the command text alone.
    pub fn check(&self, d: &CommandDetails) -> Result<(), UndoError> {
        match self {
            Strategy::Add => add::check(d),
            Strategy::Branch => branch::check(d),
            Strategy::Clean => clean::check(d),
            Strategy::Commit => Ok(()),
            Strategy::CreateBranch => branch::check_create(d),
            Strategy::Merge => merge::check(d),
            Strategy::Move => mv::check(d),
            Strategy::Navigate => Ok(()),
            Strategy::Pick(kind) => pick::check(*kind, d),
            Strategy::Rebase => merge::check_rebase(d),
            Strategy::Remote => remote::check(d),
            Strategy::Remove => restore::check_rm(d),
            Strategy::Reset => reset::check(d),
            Strategy::Restore => restore::check(d),
            Strategy::Stash => stash::check(d),
            Strategy::Tag => tag::check(d),
            Strategy::Unsupported(reason) => Err(UndoError::unsupported(&d.full_command, reason)),
        }
    }

    /// Inverse commands for `d` against the current repository state.
    pub fn plan(
        &self,
        d: &CommandDetails,
        git: &dyn GitInspector,
    ) -> Result<Vec<UndoCommand>, UndoError> {
        self.check(d)?;
        match self {
            Strategy::Add => add::plan(d, git),
            Strategy::Branch => branch::plan(d, git),
            Strategy::Clean => clean::check(d).map(|_| Vec::new()),
            Strategy::Commit => commit::plan(d, git),
            Strategy::CreateBranch => branch::plan_create(d, git),
            Strategy::Merge => merge::plan(d, git),
            Strategy::Move => mv::plan(d, git),
            Strategy::Navigate => navigate::plan(d, git),
            Strategy::Pick(kind) => pick::plan(*kind, d, git),
            Strategy::Rebase => merge::plan_rebase(d, git),
            Strategy::Remote => remote::plan(d, git),
            Strategy::Remove => restore::plan_rm(d, git),
            Strategy::Reset => reset::plan(d, git),
            Strategy::Restore => restore::plan(d, git),
            Strategy::Stash => stash::plan(d, git),
            Strategy::Tag => tag::plan(d, git),
            Strategy::Unsupported(reason) => Err(UndoError::unsupported(&d.full_command, reason)),
        }
    }
}

fn switch_strategy(d: &CommandDetails) -> Strategy {
    if branch::created_branch(d).is_some() {
        return Strategy::CreateBranch;
    }
    match parse_command(&d.full_command).map(|p| p.behavior) {
        Ok(Behavior::Navigating) => Strategy::Navigate,
        Ok(Behavior::Mutating) => Strategy::Unsupported(
            "working-tree content overwritten by a path checkout is not recoverable".into(),
        ),
        _ => Strategy::Unsupported("it did not change the repository".into()),
    }
}

/// Parse `raw` and plan its inverse.
pub fn plan_undo(raw: &str, git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    let parsed = parse_command(raw)?;
    let details = CommandDetails::new(raw, &parsed);
    Strategy::for_details(&details).plan(&details, git)
}

/// Plan for the companion go-back command when no navigation entry exists.
pub fn plan_back(git: &dyn GitInspector) -> Result<Vec<UndoCommand>, UndoError> {
    navigate::plan_previous("checkout", git)
}

// ── Shared helpers ──

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `[verb, fixed.., "--", paths..]`
fn with_paths(prefix: &[&str], paths: &[&str]) -> Vec<String> {
    let mut args = owned(prefix);
    args.push("--".to_string());
    args.extend(paths.iter().map(|p| p.to_string()));
    args
}

#[cfg(test)]
pub(crate) fn details(raw: &str) -> CommandDetails {
    match parse_command(raw) {
        Ok(parsed) => CommandDetails::new(raw, &parsed),
        Err(_) => CommandDetails {
            full_command: raw.to_string(),
            verb: String::new(),
            args: Vec::new(),
            recorded_at: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGit;

    fn strategy(raw: &str) -> Strategy {
        Strategy::for_details(&details(raw))
    }

    #[test]
    fn registry_routes_by_verb() {
        assert_eq!(strategy("git commit -m x"), Strategy::Commit);
        assert_eq!(strategy("git cherry-pick abc"), Strategy::Pick(PickKind::CherryPick));
        assert_eq!(strategy("git checkout -b feat"), Strategy::CreateBranch);
        assert_eq!(strategy("git switch --create feat"), Strategy::CreateBranch);
        assert_eq!(strategy("git checkout main"), Strategy::Navigate);
        assert!(matches!(strategy("git checkout -- a.txt"), Strategy::Unsupported(_)));
        assert!(matches!(strategy("git push origin main"), Strategy::Unsupported(_)));
        assert!(matches!(strategy("git gc"), Strategy::Unsupported(_)));
    }

    #[test]
    fn unsupported_is_typed() {
        let d = details("git push origin main");
        let err = Strategy::for_details(&d).check(&d).unwrap_err();
        assert!(err.is_unsupported());
        assert!(err.to_string().contains("git push origin main"));
    }

    #[test]
    fn plan_undo_parses_then_plans() {
        let git = ScriptedGit::new()
            .with_rev("HEAD")
            .with_rev("HEAD~1")
            .with("rev-list --parents -n 1 HEAD", "c p\n")
            .with("reflog show -1 --format=%gs HEAD", "commit: x\n")
            .with("tag --points-at HEAD", "");
        let plan = plan_undo("git commit -m x", &git).unwrap();
        assert_eq!(plan[0].command, "git reset --soft HEAD~1");
    }

    #[test]
    fn plan_undo_rejects_garbage() {
        let git = ScriptedGit::new();
        assert!(matches!(
            plan_undo("ls -la", &git),
            Err(UndoError::Parse { .. })
        ));
    }

    #[test]
    fn with_paths_places_separator() {
        assert_eq!(
            with_paths(&["add"], &["a", "b"]),
            vec!["add", "--", "a", "b"]
        );
    }
}
