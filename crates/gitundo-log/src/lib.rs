pub mod config;
pub mod entry;
pub mod log;
pub mod paths;
pub mod store;

pub use config::UndoConfig;
pub use entry::{EntryKind, LogEntry};
pub use log::{AppendOutcome, CommandLog};
pub use paths::UndoPaths;
pub use store::write_atomic;
