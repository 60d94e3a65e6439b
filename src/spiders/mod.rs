pub mod game_results;
pub mod team_stats;

pub use game_results::{classify_row, GameResultsSpider, GameRow};
pub use team_stats::{StatCategorySpec, StatSide, TeamStatsSpider, TEAM_COLUMN};
