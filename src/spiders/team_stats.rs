use crate::core::Season;
use crate::http::{HttpRequest, HttpResponse};
use crate::parser::{extract_first_table, CellSelection};
use crate::table::Table;
use crate::{ScraperError, ScraperResult, Spider};
use log::debug;
use url::Url;

/// Join key shared by every category table; never prefixed.
pub const TEAM_COLUMN: &str = "Team";
pub const SEASON_COLUMN: &str = "season";
const NULL_TOKEN: &str = "null";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatSide {
    Offense,
    Defense,
}

/// One statistics page: a category token requested on exactly one side,
/// with the other side sent as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCategorySpec {
    pub side: StatSide,
    pub category: &'static str,
}

impl StatCategorySpec {
    pub const fn offense(category: &'static str) -> Self {
        Self {
            side: StatSide::Offense,
            category,
        }
    }

    pub const fn defense(category: &'static str) -> Self {
        Self {
            side: StatSide::Defense,
            category,
        }
    }

    /// The four pages merged into each season's team table, in merge order.
    pub const ALL: [StatCategorySpec; 4] = [
        StatCategorySpec::defense("TEAM_PASSING"),
        StatCategorySpec::defense("RUSHING"),
        StatCategorySpec::offense("TEAM_PASSING"),
        StatCategorySpec::offense("RUSHING"),
    ];

    pub fn offense_token(&self) -> &'static str {
        match self.side {
            StatSide::Offense => self.category,
            StatSide::Defense => NULL_TOKEN,
        }
    }

    pub fn defense_token(&self) -> &'static str {
        match self.side {
            StatSide::Offense => NULL_TOKEN,
            StatSide::Defense => self.category,
        }
    }

    pub fn prefix(&self) -> String {
        match self.side {
            StatSide::Offense => format!("off_{}", self.category),
            StatSide::Defense => format!("def_{}", self.category),
        }
    }

    /// `Team` stays as is; every other header gets the category prefix.
    pub fn column_name(&self, header: &str) -> String {
        if header.trim() == TEAM_COLUMN {
            TEAM_COLUMN.to_string()
        } else {
            format!("{}{}", self.prefix(), header)
        }
    }

    pub fn url(&self, base_url: &str, season: Season) -> ScraperResult<Url> {
        let mut url = Url::parse(base_url)?.join("/stats/categorystats")?;
        url.query_pairs_mut()
            .append_pair("archive", "false")
            .append_pair("conference", "null")
            .append_pair("role", "TM")
            .append_pair("offensiveStatisticCategory", self.offense_token())
            .append_pair("defensiveStatisticCategory", self.defense_token())
            .append_pair("season", &season.to_string())
            .append_pair("seasonType", "REG")
            .append_pair("tabSeq", "2")
            .append_pair("qualified", "false")
            .append_pair("Submit", "Go");
        Ok(url)
    }

    /// Parses one category page into a table with prefixed column names.
    pub fn parse_page(&self, body: &str) -> ScraperResult<Table> {
        let raw = extract_first_table(body, CellSelection::Data)?;
        let columns = raw
            .header
            .iter()
            .map(|header| self.column_name(header))
            .collect();
        Table::from_rows(Table::unique_columns(columns), raw.rows)
    }
}

/// Team season statistics: four category pages per season, inner-joined
/// on the team name.
pub struct TeamStatsSpider {
    base_url: String,
    categories: Vec<StatCategorySpec>,
}

impl TeamStatsSpider {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            categories: StatCategorySpec::ALL.to_vec(),
        }
    }

    /// Inner-joins the category tables on `Team` and tags every row with
    /// the season. Teams missing from any category are dropped.
    pub fn merge_categories(season: Season, tables: Vec<Table>) -> ScraperResult<Table> {
        let mut tables = tables.into_iter();
        let Some(mut merged) = tables.next() else {
            return Err(ScraperError::EmptyJoin { season });
        };
        for table in tables {
            merged = merged.inner_join(&table, TEAM_COLUMN)?;
        }

        if merged.is_empty() {
            return Err(ScraperError::EmptyJoin { season });
        }
        merged.with_constant_column(SEASON_COLUMN, &season.to_string())
    }
}

impl Spider for TeamStatsSpider {
    fn name(&self) -> &str {
        "team_stats"
    }

    fn season_requests(&self, season: Season) -> ScraperResult<Vec<HttpRequest>> {
        self.categories
            .iter()
            .map(|spec| Ok(HttpRequest::new(spec.url(&self.base_url, season)?)))
            .collect()
    }

    fn parse_season(&self, season: Season, responses: Vec<HttpResponse>) -> ScraperResult<Table> {
        if responses.len() != self.categories.len() {
            return Err(ScraperError::ResponseCountMismatch {
                spider: self.name().to_string(),
                expected: self.categories.len(),
                found: responses.len(),
            });
        }

        let tables = self
            .categories
            .iter()
            .zip(&responses)
            .map(|(spec, response)| {
                let table = spec.parse_page(&response.body)?;
                debug!(
                    "Season {} {}: {} teams",
                    season,
                    spec.prefix(),
                    table.len()
                );
                Ok(table)
            })
            .collect::<ScraperResult<Vec<_>>>()?;

        Self::merge_categories(season, tables)
    }
}
