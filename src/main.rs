use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

/// Environment variable holding the log filter (e.g. `awslint=debug`).
const LOG_ENV: &str = "AWSLINT_LOG";

fn main() {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli::run(cli);
}
