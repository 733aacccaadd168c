use clap::Parser;
use hn_scraper::cli::Args;
use hn_scraper::{HttpItemSource, RankedFetchPipeline, ScraperConfig};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Bad arguments print usage and exit here, before any request is made
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::INFO } else { Level::WARN })
        .init();

    let config = ScraperConfig::load(&args.config)?;

    let source = HttpItemSource::new(&config.root_url, &config.fetch)?;
    let pipeline = RankedFetchPipeline::new(source, config.max_request_parallelism)?;
    info!(
        "Fetching top {} stories from {} (parallelism {})",
        args.posts,
        pipeline.source().root_url(),
        pipeline.max_parallelism()
    );

    let stories = pipeline.get_top_stories(usize::from(args.posts)).await.map_err(|e| {
        error!("Failed to list top stories: {}", e);
        Box::new(e) as Box<dyn std::error::Error>
    })?;

    println!("{}", serde_json::to_string_pretty(&stories)?);
    Ok(())
}
