use clap::Parser;
use gitundo_cli::{cmd_back, init_tracing, Context};

#[derive(Parser)]
#[command(name = "git-back", version, about = "Return to the previously checked-out branch")]
struct Cli {
    /// Print the checkout without running it
    #[arg(long)]
    dry_run: bool,
    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let cwd = std::env::current_dir()?;
    let ctx = Context::discover(&cwd)?;
    cmd_back::execute(&ctx, cli.dry_run)
}
