use clap::Parser;
use gridiron_scraper::core::retry::RetryConfig;
use gridiron_scraper::{ScraperConfig, ScraperResult, Season, TableScraper};
use std::path::PathBuf;
use std::time::Duration;

/// Scrape NFL team season statistics and game results into CSV files.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// First season to scrape
    #[arg(long, default_value_t = 2009, conflicts_with = "season")]
    first_season: Season,

    /// Last season to scrape (inclusive)
    #[arg(long, default_value_t = 2019, conflicts_with = "season")]
    last_season: Season,

    /// Scrape only these seasons; may be repeated
    #[arg(long)]
    season: Vec<Season>,

    /// Directory the CSV files are written to
    #[arg(long, default_value = "raw_data")]
    output_dir: PathBuf,

    /// Request timeout in seconds; 0 disables the timeout
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Retries for rate-limited and server-error responses
    #[arg(long, default_value_t = 0)]
    max_retries: usize,

    /// Only scrape team statistics
    #[arg(long, conflicts_with = "games_only")]
    teams_only: bool,

    /// Only scrape game results
    #[arg(long)]
    games_only: bool,
}

impl Args {
    fn seasons(&self) -> Vec<Season> {
        if self.season.is_empty() {
            (self.first_season..=self.last_season).collect()
        } else {
            self.season.clone()
        }
    }

    fn config(&self) -> ScraperConfig {
        let timeout = (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs));
        let retry = if self.max_retries > 0 {
            RetryConfig::transient(self.max_retries)
        } else {
            RetryConfig::default()
        };

        ScraperConfig::default()
            .with_output_dir(&self.output_dir)
            .with_timeout(timeout)
            .with_retry(retry)
    }
}

#[tokio::main]
async fn main() -> ScraperResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .init();

    let args = Args::parse();
    let scraper = TableScraper::new(args.seasons(), args.config())?;

    let result = if args.teams_only {
        scraper.scrape_team_stats().await.map(|_| ())
    } else if args.games_only {
        scraper.scrape_games().await.map(|_| ())
    } else {
        scraper.scrape_data().await
    };

    scraper.finish();
    result
}
