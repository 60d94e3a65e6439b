pub mod core;
pub mod http;
pub mod parser;
pub mod scrapers;
pub mod spiders;
pub mod stats;
pub mod storage;
pub mod table;

pub use crate::core::{Crawler, OutputConfig, ScraperConfig, Season, TableScraper};
pub use crate::core::{ScraperError, ScraperResult, Spider};
pub use http::{HttpRequest, HttpResponse};
pub use scrapers::Scraper;
pub use stats::StatsTracker;
pub use storage::DiskStorage;
pub use table::Table;
