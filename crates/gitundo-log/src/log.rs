//! The per-repository command history.
//!
//! One entry per line, newest first. Every mutation (prepend, toggle,
//! truncation) composes the complete new content and swaps it in with
//! [`write_atomic`], so an interrupted write leaves the previous log intact.
//! There is no cross-process locking.
//!
//! Toggle targets are identified by their text (`TIMESTAMP [REF] COMMAND`).
//! Two entries with identical text cannot be told apart; the newest one wins.

use crate::entry::LogEntry;
use crate::paths::UndoPaths;
use crate::store::write_atomic;
use anyhow::Context;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Append-ordered (newest first) log of regular and navigation entries.
#[derive(Debug, Clone)]
pub struct CommandLog {
    path: PathBuf,
}

/// Result of prepending an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Undone regular entries discarded because history diverged.
    pub truncated: Vec<LogEntry>,
}

impl CommandLog {
    pub fn open(paths: &UndoPaths) -> Self {
        Self::at(&paths.log_file)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw_lines(&self) -> anyhow::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read log {}", self.path.display()))?;
        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    fn write_raw_lines(&self, lines: &[String]) -> anyhow::Result<()> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        write_atomic(&self.path, content.as_bytes())
            .with_context(|| format!("cannot write log {}", self.path.display()))
    }

    /// All parseable entries, newest first. Corrupt lines are skipped.
    pub fn entries(&self) -> anyhow::Result<Vec<LogEntry>> {
        Ok(self
            .read_raw_lines()?
            .iter()
            .filter_map(|line| parse_or_warn(line))
            .collect())
    }

    /// Bounded read for display: at most `limit` entries from the top.
    pub fn dump(&self, limit: usize) -> anyhow::Result<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("cannot open log {}", self.path.display()))?;
        let mut out = Vec::new();
        for line in BufReader::new(file).lines() {
            if out.len() >= limit {
                break;
            }
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(entry) = parse_or_warn(&line) {
                out.push(entry);
            }
        }
        Ok(out)
    }

    /// Prepend `entry`. When it is a regular entry, undone regular entries
    /// on the same ref that sit above the newest live regular entry are
    /// dropped first; navigation entries always survive.
    pub fn append(&self, entry: &LogEntry) -> anyhow::Result<AppendOutcome> {
        let lines = self.read_raw_lines()?;
        let mut kept = Vec::with_capacity(lines.len() + 1);
        let mut truncated = Vec::new();
        kept.push(entry.to_line());

        let mut truncating = entry.is_regular();
        for line in lines {
            if truncating {
                if let Some(old) = LogEntry::parse_line(&line) {
                    if old.is_regular() && old.reference == entry.reference {
                        if old.undone {
                            truncated.push(old);
                            continue;
                        }
                        truncating = false;
                    }
                }
            }
            kept.push(line);
        }

        self.write_raw_lines(&kept)?;
        if truncated.is_empty() {
            debug!(command = %entry.command, reference = %entry.reference, "logged");
        } else {
            info!(
                command = %entry.command,
                dropped = truncated.len(),
                "history diverged; dropped undone entries"
            );
        }
        Ok(AppendOutcome { truncated })
    }

    /// Flip the undone flag of the newest line whose text matches `entry`
    /// (same body, same undone state). Returns the updated entry.
    pub fn toggle(&self, entry: &LogEntry) -> anyhow::Result<LogEntry> {
        let mut lines = self.read_raw_lines()?;
        let target = entry.to_line();
        let idx = lines
            .iter()
            .position(|l| l.trim_end() == target)
            .ok_or_else(|| anyhow::anyhow!("entry not found in log: {}", entry.body()))?;
        let toggled = entry.toggled();
        lines[idx] = toggled.to_line();
        self.write_raw_lines(&lines)?;
        debug!(line = %lines[idx], "toggled");
        Ok(toggled)
    }

    /// Newest regular entry that is not undone, optionally on `reference` only.
    pub fn last_regular(&self, reference: Option<&str>) -> anyhow::Result<Option<LogEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|e| e.is_regular() && !e.undone && on_ref(e, reference)))
    }

    /// Newest regular entry regardless of its undone flag.
    pub fn newest_regular(&self, reference: Option<&str>) -> anyhow::Result<Option<LogEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|e| e.is_regular() && on_ref(e, reference)))
    }

    /// The undone regular entries above the newest live one, newest first.
    /// The last element is the entry undone most recently.
    pub fn undone_run(&self, reference: Option<&str>) -> anyhow::Result<Vec<LogEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.is_regular() && on_ref(e, reference))
            .take_while(|e| e.undone)
            .collect())
    }

    /// Newest navigation entry that has not been walked back.
    pub fn last_navigation(&self, reference: Option<&str>) -> anyhow::Result<Option<LogEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|e| e.is_navigation() && !e.undone && on_ref(e, reference)))
    }
}

fn on_ref(entry: &LogEntry, reference: Option<&str>) -> bool {
    reference.map_or(true, |r| entry.reference == r)
}

fn parse_or_warn(line: &str) -> Option<LogEntry> {
    let entry = LogEntry::parse_line(line);
    if entry.is_none() {
        warn!(line = %line, "skipping malformed log line");
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use time::macros::datetime;

    fn entry_at(minute: u8, reference: &str, command: &str) -> LogEntry {
        LogEntry {
            timestamp: datetime!(2026-10-17 09:00:00 UTC) + time::Duration::minutes(minute.into()),
            reference: reference.to_string(),
            command: command.to_string(),
            undone: false,
            kind: EntryKind::of_command(command),
        }
    }

    fn setup() -> (tempfile::TempDir, CommandLog) {
        let tmp = tempfile::tempdir().unwrap();
        let log = CommandLog::at(tmp.path().join("git-undo").join("commands"));
        (tmp, log)
    }

    fn commands(log: &CommandLog) -> Vec<String> {
        log.entries()
            .unwrap()
            .into_iter()
            .map(|e| format!("{}{}", if e.undone { "#" } else { "" }, e.command))
            .collect()
    }

    #[test]
    fn empty_log_has_no_entries() {
        let (_tmp, log) = setup();
        assert!(log.entries().unwrap().is_empty());
        assert!(log.last_regular(None).unwrap().is_none());
        assert!(log.undone_run(None).unwrap().is_empty());
    }

    #[test]
    fn append_prepends_newest_first() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git add a.txt")).unwrap();
        log.append(&entry_at(2, "main", "git commit -m one")).unwrap();
        assert_eq!(commands(&log), vec!["git commit -m one", "git add a.txt"]);
        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert!(raw.starts_with("2026-10-17T09:02:00Z [main] git commit -m one\n"));
    }

    #[test]
    fn toggle_twice_restores_text_and_position() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git add a.txt")).unwrap();
        log.append(&entry_at(2, "main", "git commit -m one")).unwrap();
        let before = std::fs::read_to_string(log.path()).unwrap();

        let top = log.last_regular(None).unwrap().unwrap();
        let undone = log.toggle(&top).unwrap();
        assert!(undone.undone);
        assert_eq!(commands(&log), vec!["#git commit -m one", "git add a.txt"]);

        log.toggle(&undone).unwrap();
        assert_eq!(std::fs::read_to_string(log.path()).unwrap(), before);
    }

    #[test]
    fn toggle_missing_entry_fails() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git add a.txt")).unwrap();
        assert!(log.toggle(&entry_at(5, "main", "git add b.txt")).is_err());
    }

    #[test]
    fn last_regular_skips_undone_navigation_and_other_refs() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git commit -m one")).unwrap();
        log.append(&entry_at(2, "feat", "git commit -m two")).unwrap();
        log.append(&entry_at(3, "feat", "git checkout main")).unwrap();
        let two = log.last_regular(None).unwrap().unwrap();
        assert_eq!(two.command, "git commit -m two");
        log.toggle(&two).unwrap();

        assert_eq!(
            log.last_regular(None).unwrap().unwrap().command,
            "git commit -m one"
        );
        assert!(log.last_regular(Some("feat")).unwrap().is_none());
        assert_eq!(
            log.last_navigation(None).unwrap().unwrap().command,
            "git checkout main"
        );
    }

    #[test]
    fn undone_run_lists_contiguous_undone_entries() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git commit -m one")).unwrap();
        log.append(&entry_at(2, "main", "git commit -m two")).unwrap();
        log.append(&entry_at(3, "main", "git commit -m three")).unwrap();
        for _ in 0..2 {
            let e = log.last_regular(None).unwrap().unwrap();
            log.toggle(&e).unwrap();
        }
        let run = log.undone_run(Some("main")).unwrap();
        let names: Vec<_> = run.iter().map(|e| e.command.as_str()).collect();
        assert_eq!(names, vec!["git commit -m three", "git commit -m two"]);
    }

    #[test]
    fn diverging_commit_truncates_undone_entries_but_keeps_navigation() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git commit -m first")).unwrap();
        log.append(&entry_at(2, "main", "git commit -m second")).unwrap();
        log.append(&entry_at(3, "main", "git checkout main")).unwrap();
        log.append(&entry_at(4, "main", "git commit -m third")).unwrap();

        for _ in 0..2 {
            let e = log.last_regular(Some("main")).unwrap().unwrap();
            log.toggle(&e).unwrap();
        }
        assert_eq!(
            commands(&log),
            vec![
                "#git commit -m third",
                "git checkout main",
                "#git commit -m second",
                "git commit -m first"
            ]
        );

        let outcome = log.append(&entry_at(5, "main", "git commit -m C")).unwrap();
        assert_eq!(outcome.truncated.len(), 2);
        assert_eq!(
            commands(&log),
            vec![
                "git commit -m C",
                "git checkout main",
                "git commit -m first"
            ]
        );
    }

    #[test]
    fn truncation_is_scoped_to_the_entry_ref() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git commit -m one")).unwrap();
        let e = log.last_regular(None).unwrap().unwrap();
        log.toggle(&e).unwrap();
        log.append(&entry_at(2, "feat", "git commit -m two")).unwrap();
        assert_eq!(commands(&log), vec!["git commit -m two", "#git commit -m one"]);
    }

    #[test]
    fn navigation_entry_does_not_truncate() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git commit -m one")).unwrap();
        let e = log.last_regular(None).unwrap().unwrap();
        log.toggle(&e).unwrap();
        let outcome = log.append(&entry_at(2, "main", "git switch -")).unwrap();
        assert!(outcome.truncated.is_empty());
        assert_eq!(commands(&log), vec!["git switch -", "#git commit -m one"]);
    }

    #[test]
    fn corrupt_lines_are_skipped_and_preserved() {
        let (_tmp, log) = setup();
        log.append(&entry_at(1, "main", "git add a.txt")).unwrap();
        let mut raw = std::fs::read_to_string(log.path()).unwrap();
        raw.insert_str(0, "this is not an entry\n");
        std::fs::write(log.path(), raw).unwrap();

        assert_eq!(commands(&log), vec!["git add a.txt"]);
        log.append(&entry_at(2, "main", "git add b.txt")).unwrap();
        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert!(raw.contains("this is not an entry"));
        assert_eq!(commands(&log), vec!["git add b.txt", "git add a.txt"]);
    }

    #[test]
    fn dump_is_bounded() {
        let (_tmp, log) = setup();
        for i in 0..10u8 {
            log.append(&entry_at(i, "main", &format!("git add f{i}.txt"))).unwrap();
        }
        let top = log.dump(3).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].command, "git add f9.txt");
    }
}
