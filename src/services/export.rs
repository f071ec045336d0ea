//! CSV export of the current result set

use crate::engine::{ColumnDescriptor, RowRef};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `rows` as CSV: column titles, then each cell's display text
pub fn write_csv<W: Write>(writer: W, columns: &[ColumnDescriptor], rows: &[RowRef<'_>]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(columns.iter().map(|c| c.title.as_str()))?;
    for (index, r) in rows.iter().enumerate() {
        writer.write_record(columns.iter().map(|c| c.display(r.row, index)))?;
    }
    writer.flush()?;
    Ok(())
}

/// `tracktable-export-YYYYMMDD-HHMMSS.csv` inside `dir`
pub fn export_file_name(dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("tracktable-export-{}.csv", stamp))
}

/// Export to a timestamped file in `dir`, returning its path
pub fn export_to_dir(dir: &Path, columns: &[ColumnDescriptor], rows: &[RowRef<'_>]) -> Result<PathBuf> {
    let path = export_file_name(dir);
    let file = fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, columns, rows)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "exported rows");
    Ok(path)
}
