pub mod error;
pub mod parse;
pub mod types;
pub mod verb;

pub use error::{GitError, UndoError};
pub use parse::{classify, parse_command, Behavior, ParsedCommand};
pub use types::{is_flag, CommandDetails, UndoCommand};
pub use verb::{GitVerb, SyntaxClass, VerbClass};

/// Program token every raw command is expected to start with.
pub const PROGRAM: &str = "git";

/// Verbs owned by this tool. Parsed as `SyntaxClass::Custom` and never logged.
pub const OWN_VERBS: &[&str] = &["undo", "back"];
