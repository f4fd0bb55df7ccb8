use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod conversion;
mod core;
mod output;
mod parsing;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("sam2m4=debug,info")
    } else {
        EnvFilter::new("sam2m4=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    cli::convert::run(cli.convert, cli.verbose)?;

    Ok(())
}
