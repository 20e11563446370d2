use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::error::EtlError;
use crate::models::TableRow;

/// Write rows as a CSV cache file, replacing any existing file
///
/// The header is always written, so an empty table produces a header-only file.
pub fn write_table<R: TableRow>(path: &Path, rows: &[R]) -> Result<(), EtlError> {
    let cache_error = |source| EtlError::Cache {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| cache_error(e.into()))?;
    }

    let file = File::create(path).map_err(|e| cache_error(e.into()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(R::COLUMNS).map_err(cache_error)?;
    for row in rows {
        writer.serialize(row).map_err(cache_error)?;
    }
    writer.flush().map_err(|e| cache_error(e.into()))?;

    info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}
