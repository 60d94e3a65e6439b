use crate::core::Season;
use crate::table::Table;
use crate::{Scraper, ScraperResult, Spider, StatsTracker};
use log::{debug, info};

/// Drives spiders one request at a time. Each response is awaited before
/// the next request is issued.
pub struct Crawler {
    scraper: Box<dyn Scraper>,
}

impl Crawler {
    pub fn new(scraper: Box<dyn Scraper>) -> Self {
        info!("Initializing crawler");
        Self { scraper }
    }

    pub async fn crawl_season<S: Spider + ?Sized>(
        &self,
        spider: &S,
        season: Season,
    ) -> ScraperResult<Table> {
        let requests = spider.season_requests(season)?;
        debug!(
            "Spider {} issuing {} requests for season {}",
            spider.name(),
            requests.len(),
            season
        );

        let mut responses = Vec::with_capacity(requests.len());
        for request in &requests {
            responses.push(self.scraper.fetch(request).await?);
        }

        let table = spider.parse_season(season, responses)?;
        info!(
            "Spider {} built {} rows for season {}",
            spider.name(),
            table.len(),
            season
        );
        Ok(table)
    }

    pub fn stats(&self) -> &StatsTracker {
        self.scraper.stats()
    }
}
