use crate::render::{print_plan, print_warnings};
use crate::Context;

/// `git back`
pub fn execute(ctx: &Context, dry_run: bool) -> anyhow::Result<()> {
    let preview = ctx.orchestrator(true).back()?;
    print_warnings(&preview.commands);
    if dry_run {
        print_plan(&preview.commands, false);
        return Ok(());
    }

    let report = ctx.orchestrator(false).back()?;
    print_plan(&report.commands, true);
    if let Some(entry) = &report.entry {
        println!("Walked back: {}", entry.command);
    }
    Ok(())
}
