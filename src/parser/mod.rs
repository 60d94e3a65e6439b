pub mod html;

pub use html::{clean_cell, extract_first_table, header_name, CellSelection, RawTable};
