use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harmattan::config::{Config, TwitterCredentials};
use harmattan::crawler::HeadlineFetcher;
use harmattan::pipeline::Pipeline;
use harmattan::publisher::TwitterPublisher;
use harmattan::rewriter::T5Rewriter;
use harmattan::storage::PostLog;

#[derive(Parser)]
#[command(
    name = "harmattan",
    version,
    about = "Scrape, paraphrase, and tweet Nigerian news headlines",
    long_about = None
)]
struct Cli {
    /// Number of headlines to process
    #[arg(short = 'n', long = "num", default_value = "3")]
    num: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, default_value = "text")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!("harmattan starting");

    let config = Config::from_env()?;
    config.validate()?;

    // The model is the slow part of startup; load it before anything else
    // so a missing model fails fast.
    let rewriter = T5Rewriter::from_pretrained(&config.model)?;

    let fetcher = HeadlineFetcher::new(&config.fetch)?;

    let credentials = TwitterCredentials::from_env();
    if credentials.is_none() {
        tracing::warn!("Twitter credentials not fully configured; publishing will fail");
    }
    let publisher = TwitterPublisher::new(&config.twitter, credentials)?;

    let log = PostLog::new(&config.storage.log_path);

    let mut pipeline = Pipeline::new(fetcher, rewriter, publisher, log);
    let stats = pipeline.run(cli.num).await?;

    tracing::info!(
        fetched = stats.fetched,
        rewritten = stats.rewritten,
        posted = stats.posted,
        recorded = stats.recorded,
        skipped = stats.skipped,
        "harmattan completed"
    );

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("harmattan=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("harmattan=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
