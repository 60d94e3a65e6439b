mod config;
mod crawler;
mod errors;
mod spider;
mod table_scraper;
pub mod retry;

pub use config::{OutputConfig, ScraperConfig};
pub use crawler::Crawler;
pub use errors::{ScraperError, ScraperResult};
pub use spider::Spider;
pub use table_scraper::TableScraper;

/// Season year, e.g. `2019`.
pub type Season = u32;
