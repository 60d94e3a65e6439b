use crate::core::Season;
use crate::http::{HttpRequest, HttpResponse};
use crate::parser::{extract_first_table, CellSelection, RawTable};
use crate::table::Table;
use crate::{ScraperError, ScraperResult, Spider};
use log::{debug, warn};
use url::Url;

const PLAYOFFS_MARKER: &str = "Playoffs";
const SUB_HEADER_MARKER: &str = "Date";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameRow {
    Game,
    /// Repeated header row inside the table body.
    SubHeader,
    /// First row after the regular season.
    PlayoffsMarker,
}

/// Classifies a body row by the text of its indicator cell. Rows too
/// short to have one count as games and fail the width check later.
pub fn classify_row(row: &[String], indicator: usize) -> GameRow {
    match row.get(indicator).map(String::as_str) {
        Some(PLAYOFFS_MARKER) => GameRow::PlayoffsMarker,
        Some(SUB_HEADER_MARKER) => GameRow::SubHeader,
        _ => GameRow::Game,
    }
}

/// Regular-season game results, one page per season.
pub struct GameResultsSpider {
    base_url: String,
    indicator_column: String,
    expected_games: usize,
}

impl GameResultsSpider {
    pub fn new(base_url: &str, indicator_column: &str, expected_games: usize) -> Self {
        Self {
            base_url: base_url.to_string(),
            indicator_column: indicator_column.to_string(),
            expected_games,
        }
    }

    pub fn url(&self, season: Season) -> ScraperResult<Url> {
        let url = Url::parse(&self.base_url)?.join(&format!("/years/{}/games.htm", season))?;
        Ok(url)
    }

    /// Keeps body rows up to the playoffs marker, skipping repeated
    /// headers. The result is padded with null rows to the expected game
    /// count; a longer regular season grows the table.
    pub fn build_games_table(&self, season: Season, raw: RawTable) -> ScraperResult<Table> {
        let indicator = raw
            .header
            .iter()
            .position(|h| h.trim() == self.indicator_column)
            .ok_or_else(|| ScraperError::MissingColumn(self.indicator_column.clone()))?;

        let columns = Table::unique_columns(raw.header);
        let mut table = Table::with_capacity(columns, self.expected_games)?;
        let mut skipped = 0;
        for row in raw.rows {
            match classify_row(&row, indicator) {
                GameRow::PlayoffsMarker => break,
                GameRow::SubHeader => skipped += 1,
                GameRow::Game => table.push_row(row)?,
            }
        }
        debug!(
            "Season {}: {} games, {} sub-header rows skipped",
            season,
            table.len(),
            skipped
        );

        if table.len() > self.expected_games {
            warn!(
                "Season {} has {} regular-season games, more than the expected {}",
                season,
                table.len(),
                self.expected_games
            );
        }
        table.pad_to(self.expected_games);
        Ok(table)
    }
}

impl Spider for GameResultsSpider {
    fn name(&self) -> &str {
        "game_results"
    }

    fn season_requests(&self, season: Season) -> ScraperResult<Vec<HttpRequest>> {
        Ok(vec![HttpRequest::new(self.url(season)?)])
    }

    fn parse_season(&self, season: Season, responses: Vec<HttpResponse>) -> ScraperResult<Table> {
        let [response] = <[HttpResponse; 1]>::try_from(responses).map_err(|responses| {
            ScraperError::ResponseCountMismatch {
                spider: self.name().to_string(),
                expected: 1,
                found: responses.len(),
            }
        })?;

        let raw = extract_first_table(&response.body, CellSelection::DataAndHeader)?;
        self.build_games_table(season, raw)
    }
}
