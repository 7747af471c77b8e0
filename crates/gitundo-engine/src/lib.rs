pub mod inspector;
pub mod orchestrator;
pub mod state;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testing;

pub use inspector::{GitInspector, SystemGit};
pub use orchestrator::{BackReport, LogOutcome, Options, Orchestrator, RedoReport, UndoReport};
pub use strategy::{plan_undo, Strategy};
