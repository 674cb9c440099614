mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with stderr output so stdout stays clean for
    // command results
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Commands::Serve {
            host,
            port,
            graph,
            snapshot_interval,
            ner_url,
            classifier_url,
        } => {
            commands::serve::run(&host, port, graph, snapshot_interval, ner_url, classifier_url)
                .await?
        }
        cli::Commands::Update {
            text,
            label,
            file,
            graph,
            ner_url,
        } => commands::update::run(&text, label, file, graph, ner_url).await?,
        cli::Commands::Score {
            text,
            graph,
            format,
            ner_url,
        } => commands::score::run(&text, graph, &format, ner_url).await?,
        cli::Commands::Entities {
            text,
            format,
            ner_url,
        } => commands::entities::run(&text, &format, ner_url).await?,
        cli::Commands::Stats { graph } => commands::stats::run(graph)?,
    }

    Ok(())
}
