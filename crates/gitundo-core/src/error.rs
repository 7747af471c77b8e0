use thiserror::Error;

/// Failure taxonomy shared by the parser, the strategies and the orchestrator.
#[derive(Debug, Error)]
pub enum UndoError {
    /// Malformed or non-git command line. Nothing is logged.
    #[error("cannot parse `{command}`: {reason}")]
    Parse { command: String, reason: String },

    /// The verb is known but no safe inverse exists for this invocation.
    #[error("cannot undo `{command}`: {reason}")]
    Unsupported { command: String, reason: String },

    /// Repository state does not allow picking an inverse (no HEAD, too
    /// little history, ambiguous commit identity, failed inspection).
    #[error("{message}")]
    StateInconsistency { message: String },

    /// A synthesized inverse command failed when run.
    #[error("`{command}` failed ({completed} of {total} steps applied): {message}")]
    Execution {
        command: String,
        completed: usize,
        total: usize,
        message: String,
    },
}

impl UndoError {
    pub fn parse(command: &str, reason: impl Into<String>) -> Self {
        UndoError::Parse {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(command: &str, reason: impl Into<String>) -> Self {
        UndoError::Unsupported {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        UndoError::StateInconsistency {
            message: message.into(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, UndoError::Unsupported { .. })
    }

    pub fn is_state(&self) -> bool {
        matches!(self, UndoError::StateInconsistency { .. })
    }
}

/// A git invocation that could not be spawned or exited non-zero.
#[derive(Debug, Clone, Error)]
#[error("git {command} failed: {stderr}")]
pub struct GitError {
    /// Space-joined argv after the program token.
    pub command: String,
    pub status: Option<i32>,
    pub stderr: String,
}

impl GitError {
    pub fn new(args: &[&str], status: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            command: args.join(" "),
            status,
            stderr: stderr.into().trim().to_string(),
        }
    }
}

impl From<GitError> for UndoError {
    fn from(e: GitError) -> Self {
        UndoError::state(e.to_string())
    }
}
