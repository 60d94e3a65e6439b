use crate::core::Season;
use crate::http::{HttpRequest, HttpResponse};
use crate::table::Table;
use crate::ScraperResult;

/// A source of one table per season.
///
/// The crawler fetches every request from [`Spider::season_requests`] in
/// order and hands the responses, in the same order, to
/// [`Spider::parse_season`].
pub trait Spider: Send + Sync {
    fn name(&self) -> &str;

    fn season_requests(&self, season: Season) -> ScraperResult<Vec<HttpRequest>>;

    fn parse_season(&self, season: Season, responses: Vec<HttpResponse>) -> ScraperResult<Table>;
}
