use crate::table::Table;
use crate::ScraperResult;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Ensures `directory` exists, creating it and any parents when absent.
/// Calling it on an existing directory is not an error.
pub fn make_data_directory(directory: &Path) -> ScraperResult<()> {
    if directory.is_dir() {
        info!("Directory: {}, already exists.", directory.display());
    } else {
        info!("Creating directory: {}.", directory.display());
        fs::create_dir_all(directory)?;
    }
    Ok(())
}

/// Writes tables as CSV files under one base directory.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    base_path: PathBuf,
}

impl DiskStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> ScraperResult<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        make_data_directory(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Writes `table` to `file_name`, replacing any previous file. The
    /// first column holds the row index under an empty header; null
    /// cells are written as empty fields.
    ///
    /// Data goes to a temporary file in the same directory that is renamed
    /// over the target only once fully written.
    pub fn write_table(&self, file_name: &str, table: &Table) -> ScraperResult<PathBuf> {
        let final_path = self.base_path.join(file_name);
        let temp_path = self
            .base_path
            .join(format!(".{}.{}.tmp", file_name, Uuid::now_v7()));

        if let Err(e) = Self::write_csv(&temp_path, table) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                warn!(
                    "Could not remove partial file {}: {}",
                    temp_path.display(),
                    cleanup
                );
            }
            return Err(e);
        }
        fs::rename(&temp_path, &final_path)?;

        debug!(
            "Wrote {} rows x {} columns to {}",
            table.len(),
            table.columns().len(),
            final_path.display()
        );
        Ok(final_path)
    }

    fn write_csv(path: &Path, table: &Table) -> ScraperResult<()> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = Vec::with_capacity(table.columns().len() + 1);
        header.push("");
        header.extend(table.columns().iter().map(String::as_str));
        writer.write_record(&header)?;

        for (index, row) in table.index().iter().zip(table.rows()) {
            let index = index.to_string();
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(index.as_str());
            record.extend(row.iter().map(|cell| cell.as_deref().unwrap_or("")));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}
