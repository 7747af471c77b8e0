use crate::render::{print_plan, print_warnings};
use crate::Context;

/// `git undo`
pub fn undo(ctx: &Context, dry_run: bool) -> anyhow::Result<()> {
    // Plan first so warnings reach the user before anything runs.
    let preview = ctx.orchestrator(true).undo()?;
    print_warnings(&preview.commands);
    if dry_run {
        println!("Would undo: {}", preview.entry.command);
        print_plan(&preview.commands, false);
        return Ok(());
    }

    let report = ctx.orchestrator(false).undo()?;
    println!("Undid: {}", report.entry.command);
    print_plan(&report.commands, true);
    Ok(())
}

/// `git undo undo`
pub fn redo(ctx: &Context, dry_run: bool) -> anyhow::Result<()> {
    let report = ctx.orchestrator(dry_run).redo()?;
    if report.executed {
        println!("Redid: {}", report.entry.command);
    } else {
        println!("Would redo: {}", report.entry.command);
    }
    Ok(())
}
