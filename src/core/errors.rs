use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unexpected status {status} from {url}")]
    StatusError { url: String, status: u16 },

    #[error("Invalid selector: {0}")]
    SelectorError(String),

    #[error("No <table> element found in page")]
    MissingTable,

    #[error("Table has no header cells")]
    EmptyHeader,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Joining category tables for season {season} produced no rows")]
    EmptyJoin { season: u32 },

    #[error("At least one season is required")]
    NoSeasons,

    #[error("Spider {spider} expected {expected} responses, got {found}")]
    ResponseCountMismatch {
        spider: String,
        expected: usize,
        found: usize,
    },
}

pub type ScraperResult<T> = Result<T, ScraperError>;
