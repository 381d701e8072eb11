use anyhow::{Context, Result};
use clap::Parser;
use latlon_columns::cli::{run, Cli};
use std::sync::Mutex;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    run(cli).await.context("conversion failed")
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = match (cli.verbose, &cli.log_file) {
        (true, _) => Level::DEBUG,
        (false, Some(_)) => Level::INFO,
        (false, None) => Level::WARN,
    };
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    match cli.log_file {
        Some(ref path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
