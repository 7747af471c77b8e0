use crate::Context;
use gitundo_core::UndoError;
use gitundo_engine::LogOutcome;
use tracing::{debug, info};

/// `git undo --hook "<command line>"`: called by shell hooks after every
/// git invocation. Lines that are not git commands are ignored quietly.
pub fn execute(ctx: &Context, raw: &str) -> anyhow::Result<()> {
    ctx.paths.ensure_layout()?;
    let outcome = match ctx.orchestrator(false).record(raw) {
        Ok(outcome) => outcome,
        Err(e) if matches!(e.downcast_ref::<UndoError>(), Some(UndoError::Parse { .. })) => {
            debug!(command = raw, error = %e, "ignored");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    match outcome {
        LogOutcome::Skipped => {}
        LogOutcome::Logged { truncated, .. } => {
            if !truncated.is_empty() {
                debug!(dropped = truncated.len(), "redo history discarded");
            }
        }
        // Reported when `git undo` reaches the entry, not after every fetch or push.
        LogOutcome::LoggedNotUndoable { entry, reason } => {
            info!(command = %entry.command, %reason, "logged without an inverse");
        }
    }
    Ok(())
}
