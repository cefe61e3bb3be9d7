use anyhow::Context;
use branch_cleaner::cli::{execute_command, Cli};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("branch-cleaner: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    execute_command(cli).context("branch cleanup aborted")
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "branch_cleaner=debug"
    } else {
        "branch_cleaner=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
