mod html_parser;

pub use html_parser::{clean_cell, extract_first_table, header_name, CellSelection, RawTable};
