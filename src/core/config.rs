use crate::core::retry::RetryConfig;
use crate::core::Season;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TEAM_STATS_BASE_URL: &str = "http://www.nfl.com";
pub const DEFAULT_GAMES_BASE_URL: &str = "https://www.pro-football-reference.com";
pub const DEFAULT_INDICATOR_COLUMN: &str = "Date";
pub const DEFAULT_EXPECTED_GAMES: usize = 256;

/// Where output files land.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub team_stats_file: String,
    /// File name pattern for per-season game data; `{season}` is replaced
    /// by the season.
    pub games_file_pattern: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("raw_data"),
            team_stats_file: "TeamSeasonStats_Raw.csv".to_string(),
            games_file_pattern: "GameData_{season}_Raw.csv".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn games_file(&self, season: Season) -> String {
        self.games_file_pattern.replace("{season}", &season.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub output: OutputConfig,
    pub team_stats_base_url: String,
    pub games_base_url: String,
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
    pub retry: RetryConfig,
    pub indicator_column: String,
    pub expected_games: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            team_stats_base_url: DEFAULT_TEAM_STATS_BASE_URL.to_string(),
            games_base_url: DEFAULT_GAMES_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(30)),
            headers: Vec::new(),
            retry: RetryConfig::default(),
            indicator_column: DEFAULT_INDICATOR_COLUMN.to_string(),
            expected_games: DEFAULT_EXPECTED_GAMES,
        }
    }
}

impl ScraperConfig {
    pub fn with_output_dir<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.output.directory = directory.as_ref().to_path_buf();
        self
    }

    pub fn with_team_stats_base_url(mut self, url: &str) -> Self {
        self.team_stats_base_url = url.to_string();
        self
    }

    pub fn with_games_base_url(mut self, url: &str) -> Self {
        self.games_base_url = url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_expected_games(mut self, expected_games: usize) -> Self {
        self.expected_games = expected_games;
        self
    }
}
