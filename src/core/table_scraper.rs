use crate::core::{Crawler, OutputConfig, ScraperConfig, Season};
use crate::scrapers::HttpScraper;
use crate::spiders::{GameResultsSpider, TeamStatsSpider};
use crate::storage::DiskStorage;
use crate::stats::ScrapingStats;
use crate::table::Table;
use crate::{Scraper, ScraperError, ScraperResult};
use log::info;
use std::path::PathBuf;

/// Scrapes team season statistics and regular-season game results for a
/// list of seasons and writes them as CSV files.
pub struct TableScraper {
    seasons: Vec<Season>,
    output: OutputConfig,
    storage: DiskStorage,
    crawler: Crawler,
    team_spider: TeamStatsSpider,
    game_spider: GameResultsSpider,
}

impl TableScraper {
    /// Creates a scraper fetching over HTTP as configured in `config`.
    pub fn new(seasons: Vec<Season>, config: ScraperConfig) -> ScraperResult<Self> {
        let scraper = HttpScraper::from_config(&config)?;
        Self::with_scraper(seasons, config, Box::new(scraper))
    }

    /// Prepares the output directory; `seasons` must not be empty.
    pub fn with_scraper(
        seasons: Vec<Season>,
        config: ScraperConfig,
        scraper: Box<dyn Scraper>,
    ) -> ScraperResult<Self> {
        if seasons.is_empty() {
            return Err(ScraperError::NoSeasons);
        }
        let storage = DiskStorage::new(&config.output.directory)?;

        Ok(Self {
            seasons,
            storage,
            crawler: Crawler::new(scraper),
            team_spider: TeamStatsSpider::new(&config.team_stats_base_url),
            game_spider: GameResultsSpider::new(
                &config.games_base_url,
                &config.indicator_column,
                config.expected_games,
            ),
            output: config.output,
        })
    }

    fn season_range(&self) -> (Season, Season) {
        // `seasons` is checked non-empty on construction.
        let first = self.seasons.first().copied().unwrap_or_default();
        let last = self.seasons.last().copied().unwrap_or_default();
        (first, last)
    }

    /// Builds the merged team table for every season and writes them all
    /// to one file. Nothing is written unless every season succeeds.
    pub async fn scrape_team_stats(&self) -> ScraperResult<PathBuf> {
        let mut season_tables = Vec::with_capacity(self.seasons.len());
        for &season in &self.seasons {
            let table = self.crawler.crawl_season(&self.team_spider, season).await?;
            season_tables.push(table);
        }

        let combined = Table::concat(season_tables);
        let path = self
            .storage
            .write_table(&self.output.team_stats_file, &combined)?;
        info!(
            "Saved {} team seasons to {}",
            combined.len(),
            path.display()
        );
        Ok(path)
    }

    /// Scrapes and writes one game file per season, in season order.
    /// Stops at the first failing season; files already written stay.
    pub async fn scrape_games(&self) -> ScraperResult<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(self.seasons.len());
        for &season in &self.seasons {
            let table = self.crawler.crawl_season(&self.game_spider, season).await?;
            let path = self
                .storage
                .write_table(&self.output.games_file(season), &table)?;
            info!("Saved season {} games to {}", season, path.display());
            paths.push(path);
        }
        Ok(paths)
    }

    /// Team statistics first, then game results.
    pub async fn scrape_data(&self) -> ScraperResult<()> {
        let (first, last) = self.season_range();

        info!(
            "Scraping offensive and defensive team statistics from nfl.com for seasons {}-{}...",
            first, last
        );
        self.scrape_team_stats().await?;
        info!("Done.");

        info!(
            "Scraping game results from pro-football-reference.com for seasons {}-{}...",
            first, last
        );
        self.scrape_games().await?;
        info!("Done.");
        Ok(())
    }

    /// Closes the run's request statistics and logs their summary. Safe
    /// to call after any phase, including a failed one.
    pub fn finish(&self) -> ScrapingStats {
        let stats = self.crawler.stats();
        stats.finish();
        stats.log_summary();
        stats.snapshot()
    }
}

#[cfg(test)]
mod tests;
