mod cli;
mod compare_cmd;
mod page_range;
mod plan_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Compare {
            ref old,
            ref new,
            ref pages,
            ref format,
            ref diff,
        } => compare_cmd::run(old, new, pages.as_deref(), format, diff),
        cli::Commands::Plan {
            ref old,
            ref new,
            ref diff,
        } => plan_cmd::run(old, new, diff),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
