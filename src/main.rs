//! Remote console binary

use anyhow::Context;
use clap::Parser;
use remote_console::{server, Cli, ConsoleAppender};
use tracing::Level;

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.server_config()?;
    let console = ConsoleAppender::stdout();
    console.set_use_colors(config.use_colors);
    tracing::debug!(colors = config.use_colors, "console configured");

    let listener = server::bind(&config)
        .await
        .with_context(|| format!("failed to start on {}", config.socket_addr()))?;
    server::serve(listener, console, server::shutdown_signal()).await?;

    Ok(())
}
