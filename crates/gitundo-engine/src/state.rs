//! Read-only repository queries built on [`GitInspector::output`].

use crate::inspector::GitInspector;
use gitundo_core::GitError;

/// Whether `rev` resolves to an object.
pub fn rev_exists(git: &dyn GitInspector, rev: &str) -> bool {
    git.output("rev-parse", &["--verify", "--quiet", rev])
        .map(|out| !out.trim().is_empty())
        .unwrap_or(false)
}

pub fn has_head(git: &dyn GitInspector) -> bool {
    rev_exists(git, "HEAD")
}

/// Non-empty trimmed lines of a command's output.
pub fn lines(git: &dyn GitInspector, verb: &str, args: &[&str]) -> Result<Vec<String>, GitError> {
    Ok(git
        .output(verb, args)?
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// First line of a command's output, trimmed.
pub fn first_line(git: &dyn GitInspector, verb: &str, args: &[&str]) -> Result<String, GitError> {
    Ok(git
        .output(verb, args)?
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .to_string())
}

/// Branch name, short hash when detached, symbolic name on an unborn branch.
pub fn current_ref(git: &dyn GitInspector) -> Result<String, GitError> {
    match first_line(git, "rev-parse", &["--abbrev-ref", "HEAD"]) {
        Ok(name) if name == "HEAD" => first_line(git, "rev-parse", &["--short", "HEAD"]),
        Ok(name) if !name.is_empty() => Ok(name),
        _ => first_line(git, "symbolic-ref", &["--short", "HEAD"]),
    }
}

/// Name of the previously checked-out ref (`@{-1}`), if any.
pub fn previous_ref(git: &dyn GitInspector) -> Option<String> {
    first_line(git, "rev-parse", &["--abbrev-ref", "@{-1}"])
        .ok()
        .filter(|s| !s.is_empty())
}

/// Number of parents of HEAD.
pub fn head_parent_count(git: &dyn GitInspector) -> Result<usize, GitError> {
    let line = first_line(git, "rev-list", &["--parents", "-n", "1", "HEAD"])?;
    Ok(line.split_whitespace().count().saturating_sub(1))
}

/// Subject of the newest reflog entry for HEAD (e.g. `commit (amend): msg`).
pub fn reflog_subject(git: &dyn GitInspector) -> String {
    first_line(git, "reflog", &["-1", "--format=%gs"]).unwrap_or_default()
}

/// Ref whose reflog holds only this branch's own moves: `refs/heads/<name>`
/// when a branch is checked out, `HEAD` when detached.
pub fn reflog_ref(git: &dyn GitInspector) -> String {
    first_line(git, "symbolic-ref", &["--quiet", "HEAD"])
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "HEAD".to_string())
}

/// Subject of the newest entry in `reference`'s reflog, empty when it has none.
pub fn ref_reflog_subject(git: &dyn GitInspector, reference: &str) -> String {
    first_line(git, "reflog", &["show", "-1", "--format=%gs", reference]).unwrap_or_default()
}

/// Where `reference` pointed before its latest move (`<ref>@{1}`), as a full hash.
pub fn previous_position(git: &dyn GitInspector, reference: &str) -> Option<String> {
    let rev = format!("{reference}@{{1}}");
    first_line(git, "rev-parse", &["--verify", "--quiet", rev.as_str()])
        .ok()
        .filter(|s| !s.is_empty())
}

pub fn staged_files(git: &dyn GitInspector) -> Result<Vec<String>, GitError> {
    lines(git, "diff", &["--cached", "--name-only"])
}

pub fn unstaged_files(git: &dyn GitInspector) -> Result<Vec<String>, GitError> {
    lines(git, "diff", &["--name-only"])
}

pub fn untracked_files(git: &dyn GitInspector) -> Result<Vec<String>, GitError> {
    lines(git, "ls-files", &["--others", "--exclude-standard"])
}

/// Warnings about staged and unstaged changes that `action` would discard.
/// Empty when both diffs are empty.
pub fn discard_warnings(git: &dyn GitInspector, action: &str) -> Result<Vec<String>, GitError> {
    let mut warnings = Vec::new();
    let staged = staged_files(git)?;
    if !staged.is_empty() {
        warnings.push(format!(
            "{action} discards staged changes in {} file(s): {}",
            staged.len(),
            preview(&staged)
        ));
    }
    let unstaged = unstaged_files(git)?;
    if !unstaged.is_empty() {
        warnings.push(format!(
            "{action} discards unstaged changes in {} file(s): {}",
            unstaged.len(),
            preview(&unstaged)
        ));
    }
    Ok(warnings)
}

/// First few names, with a count of the rest.
pub fn preview(names: &[String]) -> String {
    const SHOWN: usize = 3;
    let mut s = names
        .iter()
        .take(SHOWN)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > SHOWN {
        s.push_str(&format!(" and {} more", names.len() - SHOWN));
    }
    s
}
