use crate::render::entry_line;
use crate::Context;

/// `git undo --log [--json]`, newest first, at most `log_limit` entries.
pub fn execute(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let entries = ctx.log().dump(ctx.config.log_limit)?;

    if json {
        for e in &entries {
            println!("{}", serde_json::to_string(&e.to_json())?);
        }
        return Ok(());
    }

    if entries.is_empty() {
        println!("No commands logged.");
        return Ok(());
    }
    for e in &entries {
        println!("{}", entry_line(e));
    }
    Ok(())
}
