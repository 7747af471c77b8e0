use std::path::{Path, PathBuf};

/// Name of the tool's directory inside the repository's git dir.
pub const UNDO_DIR: &str = "git-undo";

/// All well-known paths under `<git-dir>/git-undo/`.
#[derive(Debug, Clone)]
pub struct UndoPaths {
    pub git_dir: PathBuf,
    pub undo_dir: PathBuf,
    pub log_file: PathBuf,
    pub config_json: PathBuf,
}

impl UndoPaths {
    /// Derive all paths from a git dir. Pure computation, no I/O.
    pub fn discover(git_dir: impl Into<PathBuf>) -> Self {
        let git_dir = git_dir.into();
        let undo_dir = git_dir.join(UNDO_DIR);
        Self {
            log_file: undo_dir.join("commands"),
            config_json: undo_dir.join("config.json"),
            undo_dir,
            git_dir,
        }
    }

    /// Point the log at a different file, e.g. from `GIT_UNDO_LOG`.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Create the tool directory. Idempotent.
    pub fn ensure_layout(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.undo_dir)?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.undo_dir.is_dir()
    }

    /// Resolve `rev-parse --git-dir` output against the working directory.
    pub fn resolve_git_dir(cwd: &Path, rev_parse_output: &str) -> PathBuf {
        let raw = Path::new(rev_parse_output.trim());
        if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            cwd.join(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_builds_correct_paths() {
        let p = UndoPaths::discover("/tmp/repo/.git");
        assert_eq!(p.undo_dir, PathBuf::from("/tmp/repo/.git/git-undo"));
        assert_eq!(p.log_file, PathBuf::from("/tmp/repo/.git/git-undo/commands"));
        assert_eq!(
            p.config_json,
            PathBuf::from("/tmp/repo/.git/git-undo/config.json")
        );
    }

    #[test]
    fn log_file_override() {
        let p = UndoPaths::discover("/tmp/repo/.git").with_log_file("/tmp/other.log");
        assert_eq!(p.log_file, PathBuf::from("/tmp/other.log"));
        assert_eq!(p.undo_dir, PathBuf::from("/tmp/repo/.git/git-undo"));
    }

    #[test]
    fn relative_git_dir_is_joined_to_cwd() {
        let cwd = Path::new("/work/repo");
        assert_eq!(
            UndoPaths::resolve_git_dir(cwd, ".git\n"),
            PathBuf::from("/work/repo/.git")
        );
        assert_eq!(
            UndoPaths::resolve_git_dir(cwd, "/elsewhere/.git"),
            PathBuf::from("/elsewhere/.git")
        );
    }

    #[test]
    fn ensure_layout_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let p = UndoPaths::discover(tmp.path().join(".git"));
        assert!(!p.is_initialized());
        p.ensure_layout().unwrap();
        assert!(p.is_initialized());
    }
}
