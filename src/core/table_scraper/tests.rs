use super::*;
use crate::scrapers::{MockResponse, MockScraper};
use crate::spiders::StatCategorySpec;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn team_page(teams: &[&str]) -> String {
    let rows: String = teams
        .iter()
        .enumerate()
        .map(|(i, team)| {
            format!(
                "<tr><td>\n\t{}\n</td><td>{},{:03}</td><td>{}</td></tr>",
                team,
                i + 1,
                i * 7,
                i + 10
            )
        })
        .collect();
    format!(
        "<html><body><table><tr><th>Team</th><th>Yds</th><th>TD</th></tr>{}</table></body></html>",
        rows
    )
}

fn games_page(winners: &[&str]) -> String {
    let mut rows = String::new();
    for (i, winner) in winners.iter().enumerate() {
        if i == 1 {
            rows.push_str(
                "<tr class=\"thead\"><th>Week</th><th>Day</th><th>Date</th><th>Winner/tie</th><th>PtsW</th></tr>",
            );
        }
        rows.push_str(&format!(
            "<tr><th>{}</th><td>Sun</td><td>2019-09-{:02}</td><td>{}</td><td>2{}</td></tr>",
            i + 1,
            i + 8,
            winner,
            i
        ));
    }
    rows.push_str("<tr><td></td><td></td><td>Playoffs</td><td></td><td></td></tr>");
    rows.push_str(
        "<tr><th>WildCard</th><td>Sat</td><td>2020-01-04</td><td>Playoff Team</td><td>30</td></tr>",
    );
    format!(
        "<table><tr><th>Week</th><th>Day</th><th>Date</th><th>Winner/tie</th><th>PtsW</th></tr>{}</table>",
        rows
    )
}

fn category_route(spec: &StatCategorySpec, season: Season) -> String {
    format!(
        "offensiveStatisticCategory={}&defensiveStatisticCategory={}&season={}",
        spec.offense_token(),
        spec.defense_token(),
        season
    )
}

fn with_team_pages(mut scraper: MockScraper, season: Season, pages: [&[&str]; 4]) -> MockScraper {
    for (spec, teams) in StatCategorySpec::ALL.iter().zip(pages) {
        scraper = scraper.with_route(
            &category_route(spec, season),
            MockResponse::ok(team_page(teams)),
        );
    }
    scraper
}

fn config(dir: &TempDir) -> ScraperConfig {
    ScraperConfig::default().with_output_dir(dir.path().join("raw_data"))
}

fn read_csv(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

/// Lets a test keep a handle on the scraper it hands to `TableScraper`.
struct SharedScraper(Arc<MockScraper>);

#[async_trait::async_trait]
impl Scraper for SharedScraper {
    async fn fetch_single(
        &self,
        request: &crate::http::HttpRequest,
    ) -> ScraperResult<crate::http::HttpResponse> {
        self.0.fetch_single(request).await
    }

    fn retry_config(&self) -> &crate::core::retry::RetryConfig {
        self.0.retry_config()
    }

    fn stats(&self) -> &crate::StatsTracker {
        self.0.stats()
    }
}

#[test]
fn test_requires_seasons() {
    let dir = TempDir::new().unwrap();
    let result =
        TableScraper::with_scraper(Vec::new(), config(&dir), Box::new(MockScraper::default()));
    assert!(matches!(result, Err(ScraperError::NoSeasons)));
}

#[test]
fn test_construction_creates_output_directory() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);

    TableScraper::with_scraper(vec![2019], config.clone(), Box::new(MockScraper::default()))
        .unwrap();
    assert!(config.output.directory.is_dir());
    // existing directory is fine
    TableScraper::with_scraper(vec![2019], config.clone(), Box::new(MockScraper::default()))
        .unwrap();
}

#[tokio::test]
async fn test_team_stats_end_to_end() {
    let dir = TempDir::new().unwrap();
    let scraper = with_team_pages(
        MockScraper::default(),
        2019,
        [&["DEN", "NE"], &["DEN", "NE"], &["NE", "DEN"], &["DEN", "NE"]],
    );
    let table_scraper =
        TableScraper::with_scraper(vec![2019], config(&dir), Box::new(scraper)).unwrap();

    let path = table_scraper.scrape_team_stats().await.unwrap();
    assert_eq!(path.file_name().unwrap(), "TeamSeasonStats_Raw.csv");

    let (header, rows) = read_csv(&path);
    assert_eq!(
        header,
        vec![
            "",
            "Team",
            "def_TEAM_PASSINGYds",
            "def_TEAM_PASSINGTD",
            "def_RUSHINGYds",
            "def_RUSHINGTD",
            "off_TEAM_PASSINGYds",
            "off_TEAM_PASSINGTD",
            "off_RUSHINGYds",
            "off_RUSHINGTD",
            "season"
        ]
    );
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][..3], ["0", "DEN", "1000"]);
    // NE is the first row of the offensive passing page
    assert_eq!(rows[1][6], "1000");
    assert_eq!(rows[1][2], "2007");
    assert!(rows.iter().all(|r| r[10] == "2019"));
}

#[tokio::test]
async fn test_team_stats_drop_teams_missing_from_a_category() {
    let dir = TempDir::new().unwrap();
    let scraper = with_team_pages(
        MockScraper::default(),
        2019,
        [&["A", "B", "C"], &["A", "B", "C"], &["A", "B", "C"], &["A", "B"]],
    );
    let table_scraper =
        TableScraper::with_scraper(vec![2019], config(&dir), Box::new(scraper)).unwrap();

    let path = table_scraper.scrape_team_stats().await.unwrap();
    let (_, rows) = read_csv(&path);
    let teams: Vec<&str> = rows.iter().map(|r| r[1].as_str()).collect();
    assert_eq!(teams, vec!["A", "B"]);
}

#[tokio::test]
async fn test_team_stats_concatenate_seasons() {
    let dir = TempDir::new().unwrap();
    let scraper = with_team_pages(MockScraper::default(), 2019, [&["A", "B"][..]; 4]);
    let scraper = with_team_pages(scraper, 2020, [&["A", "B", "C"][..]; 4]);
    let table_scraper =
        TableScraper::with_scraper(vec![2019, 2020], config(&dir), Box::new(scraper)).unwrap();

    let path = table_scraper.scrape_team_stats().await.unwrap();
    let (header, rows) = read_csv(&path);
    let season = header.iter().position(|h| h == "season").unwrap();

    assert_eq!(rows.len(), 2 + 3);
    let seasons: Vec<&str> = rows.iter().map(|r| r[season].as_str()).collect();
    assert_eq!(seasons, vec!["2019", "2019", "2020", "2020", "2020"]);
    // index restarts per season
    let index: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(index, vec!["0", "1", "0", "1", "2"]);
}

#[tokio::test]
async fn test_team_stats_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    // 2020 pages are not routed and fall through to 404
    let scraper = with_team_pages(MockScraper::default(), 2019, [&["A"][..]; 4]);
    let config = config(&dir);
    let table_scraper =
        TableScraper::with_scraper(vec![2019, 2020], config.clone(), Box::new(scraper)).unwrap();

    let result = table_scraper.scrape_team_stats().await;

    assert!(matches!(result, Err(ScraperError::StatusError { status: 404, .. })));
    assert_eq!(fs::read_dir(&config.output.directory).unwrap().count(), 0);
}

#[tokio::test]
async fn test_team_stats_missing_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    let scraper = MockScraper::new(vec![MockResponse::ok("<html><body>maintenance</body></html>")]);
    let table_scraper =
        TableScraper::with_scraper(vec![2019], config(&dir), Box::new(scraper)).unwrap();

    let result = table_scraper.scrape_team_stats().await;
    assert!(matches!(result, Err(ScraperError::MissingTable)));
}

#[tokio::test]
async fn test_scrape_games_writes_one_file_per_season() {
    let dir = TempDir::new().unwrap();
    let scraper = MockScraper::default()
        .with_route("/years/2019/", MockResponse::ok(games_page(&["A", "B", "C"])))
        .with_route("/years/2020/", MockResponse::ok(games_page(&["D"])));
    let table_scraper =
        TableScraper::with_scraper(vec![2019, 2020], config(&dir), Box::new(scraper)).unwrap();

    let paths = table_scraper.scrape_games().await.unwrap();

    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].file_name().unwrap(), "GameData_2019_Raw.csv");
    assert_eq!(paths[1].file_name().unwrap(), "GameData_2020_Raw.csv");

    let (header, rows) = read_csv(&paths[0]);
    assert_eq!(header, vec!["", "Week", "Day", "Date", "Winner/tie", "PtsW"]);
    assert_eq!(rows.len(), 256);
    let winners: Vec<&str> = rows[..4].iter().map(|r| r[4].as_str()).collect();
    assert_eq!(winners, vec!["A", "B", "C", ""]);
    assert_eq!(rows[255][0], "255");

    let (_, rows) = read_csv(&paths[1]);
    assert_eq!(rows[0][4], "D");
    assert_eq!(rows[1][4], "");
}

#[tokio::test]
async fn test_scrape_data_runs_team_stats_before_games() {
    let dir = TempDir::new().unwrap();
    let scraper = with_team_pages(MockScraper::default(), 2019, [&["A", "B"][..]; 4])
        .with_route("/years/2019/", MockResponse::ok(games_page(&["A"])));
    let shared = Arc::new(scraper);
    let config = config(&dir).with_expected_games(16);
    let table_scraper = TableScraper::with_scraper(
        vec![2019],
        config.clone(),
        Box::new(SharedScraper(Arc::clone(&shared))),
    )
    .unwrap();

    table_scraper.scrape_data().await.unwrap();

    let requested = shared.requested_urls();
    assert_eq!(requested.len(), 5);
    assert!(requested[..4]
        .iter()
        .all(|u| u.path() == "/stats/categorystats"));
    assert_eq!(requested[4].path(), "/years/2019/games.htm");

    let directory = &config.output.directory;
    assert!(directory.join("TeamSeasonStats_Raw.csv").is_file());
    let (_, rows) = read_csv(&directory.join("GameData_2019_Raw.csv"));
    assert_eq!(rows.len(), 16);
    assert_eq!(shared.stats().snapshot().requests, 5);
}

#[tokio::test]
async fn test_finish_reports_stats_after_single_phase() {
    let dir = TempDir::new().unwrap();
    let scraper = MockScraper::default()
        .with_route("/years/2019/", MockResponse::ok(games_page(&["A"])));
    let table_scraper =
        TableScraper::with_scraper(vec![2019, 2020], config(&dir), Box::new(scraper)).unwrap();

    // 2020 is not routed, so the games phase fails on its 404
    assert!(table_scraper.scrape_games().await.is_err());

    let stats = table_scraper.finish();
    assert!(stats.end_time.is_some());
    assert_eq!(stats.requests, 2);
    assert_eq!(stats.failed_requests, 1);
    assert_eq!(stats.status_codes.get(&404), Some(&1));
}

#[tokio::test]
async fn test_http_pipeline_against_mock_server() {
    let server = MockServer::start().await;
    for spec in StatCategorySpec::ALL {
        Mock::given(method("GET"))
            .and(path("/stats/categorystats"))
            .and(query_param("offensiveStatisticCategory", spec.offense_token()))
            .and(query_param("defensiveStatisticCategory", spec.defense_token()))
            .and(query_param("season", "2019"))
            .respond_with(ResponseTemplate::new(200).set_body_string(team_page(&["DEN", "KC"])))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/years/2019/games.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(games_page(&["KC", "DEN"])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = config(&dir)
        .with_team_stats_base_url(&server.uri())
        .with_games_base_url(&server.uri());
    let table_scraper = TableScraper::new(vec![2019], config.clone()).unwrap();

    table_scraper.scrape_data().await.unwrap();

    let (header, rows) = read_csv(&config.output.directory.join("TeamSeasonStats_Raw.csv"));
    assert_eq!(header.len(), 1 + 1 + 8 + 1);
    assert_eq!(rows.len(), 2);
    let (_, games) = read_csv(&config.output.directory.join("GameData_2019_Raw.csv"));
    assert_eq!(games[1][4], "DEN");
}
