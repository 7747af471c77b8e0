use clap::{Parser, Subcommand};
use gitundo_cli::cmd_config::ConfigCmd;
use gitundo_cli::{cmd_config, cmd_hook, cmd_log, cmd_undo, init_tracing, Context};

#[derive(Parser)]
#[command(name = "git-undo", version, about = "Undo the last git command")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
    /// Print the inverse commands without running them
    #[arg(long, global = true)]
    dry_run: bool,
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Print the command log, newest first
    #[arg(long, conflicts_with = "hook")]
    log: bool,
    /// With --log, print one JSON object per entry
    #[arg(long, requires = "log")]
    json: bool,
    /// Record a git command line (called from shell hooks)
    #[arg(long, value_name = "COMMAND", allow_hyphen_values = true)]
    hook: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Redo the most recently undone command
    #[command(alias = "redo")]
    Undo,
    /// Read or change settings for this repository
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let cwd = std::env::current_dir()?;
    let ctx = Context::discover(&cwd)?;

    if let Some(raw) = cli.hook {
        return cmd_hook::execute(&ctx, &raw);
    }
    if cli.log {
        return cmd_log::execute(&ctx, cli.json);
    }
    match cli.cmd {
        None => cmd_undo::undo(&ctx, cli.dry_run),
        Some(Command::Undo) => cmd_undo::redo(&ctx, cli.dry_run),
        Some(Command::Config { cmd }) => cmd_config::run(cmd, &ctx),
    }
}
