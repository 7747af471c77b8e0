use gitundo_core::UndoCommand;
use gitundo_log::LogEntry;

pub fn print_warnings(commands: &[UndoCommand]) {
    for w in commands.iter().flat_map(|c| &c.warnings) {
        eprintln!("warning: {w}");
    }
}

pub fn print_plan(commands: &[UndoCommand], executed: bool) {
    let verb = if executed { "ran" } else { "would run" };
    for cmd in commands {
        println!("  {verb}: {}", cmd.command);
        println!("      {}", cmd.description);
    }
}

/// One log line for `--log`.
pub fn entry_line(entry: &LogEntry) -> String {
    let mark = if entry.undone { "undone" } else { "      " };
    let kind = if entry.is_navigation() { " (nav)" } else { "" };
    format!("{mark} {}{kind}", entry.body())
}
