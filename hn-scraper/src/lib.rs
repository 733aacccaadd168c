pub mod types;
pub mod traits;
pub mod fetcher;
pub mod validator;
pub mod pipeline;
pub mod config;
pub mod cli;

pub use types::*;
pub use traits::ItemSource;
pub use fetcher::HttpItemSource;
pub use validator::{validate, ValidatedItem, ValidationFailure};
pub use pipeline::RankedFetchPipeline;
pub use config::ScraperConfig;
