use crate::{ScraperError, ScraperResult};
use log::{debug, trace};
use scraper::{ElementRef, Html, Selector};

/// Which cells of a body row carry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSelection {
    /// Only `<td>` cells.
    Data,
    /// `<td>` and `<th>` cells in document order, for tables that use
    /// row-header cells.
    DataAndHeader,
}

/// Header and body rows of one HTML table, as extracted. Body cells are
/// already cleaned; rows are not yet checked against the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Strips tabs, newlines and commas. Commas are dropped, not parsed as
/// thousands separators.
pub fn clean_cell(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\t' | '\n' | ','))
        .collect()
}

/// Header text with newlines removed. Other whitespace is kept; callers
/// matching a header by name compare its trimmed form.
pub fn header_name(text: &str) -> String {
    text.replace('\n', "")
}

fn selector(css: &str) -> ScraperResult<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::SelectorError(e.to_string()))
}

fn cell_texts<'a>(
    row: ElementRef<'a>,
    cells: &'a Selector,
) -> impl Iterator<Item = String> + 'a {
    row.select(cells).map(|cell| cell.text().collect::<String>())
}

/// Locates the first `<table>` in `body` and splits it into its first
/// row (header, `<th>` cells) and the remaining rows.
pub fn extract_first_table(body: &str, cells: CellSelection) -> ScraperResult<RawTable> {
    let document = Html::parse_document(body);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let header_selector = selector("th")?;
    let data_selector = match cells {
        CellSelection::Data => selector("td")?,
        CellSelection::DataAndHeader => selector("td, th")?,
    };

    let table = document
        .select(&table_selector)
        .next()
        .ok_or(ScraperError::MissingTable)?;

    let mut rows = table.select(&row_selector);
    let header: Vec<String> = rows
        .next()
        .map(|row| cell_texts(row, &header_selector).map(|t| header_name(&t)).collect())
        .unwrap_or_default();
    if header.is_empty() {
        return Err(ScraperError::EmptyHeader);
    }
    trace!("Table header: {:?}", header);

    let rows: Vec<Vec<String>> = rows
        .map(|row| cell_texts(row, &data_selector).map(|t| clean_cell(&t)).collect())
        .collect();
    debug!(
        "Extracted table with {} columns and {} rows",
        header.len(),
        rows.len()
    );

    Ok(RawTable { header, rows })
}
