use clap::Parser;
use std::path::PathBuf;

/// Print the current top Hacker News stories as JSON.
#[derive(Debug, Parser)]
#[command(name = "hn-scraper", version)]
pub struct Args {
    /// How many posts to print. N is an integer from 0 to 100.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub posts: u8,

    /// Settings file with rootUrl and maxRequestParallelism
    #[arg(long, default_value = "settings.json")]
    pub config: PathBuf,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
