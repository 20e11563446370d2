use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EtlError;
use crate::models::TableRow;

/// Stage input: a cache file to load, or rows already in memory
#[derive(Debug, Clone)]
pub enum Source<R> {
    Path(PathBuf),
    Table(Vec<R>),
}

impl<R: TableRow> Source<R> {
    /// Resolve into rows, loading from disk if needed
    pub fn resolve(self) -> Result<Vec<R>, EtlError> {
        match self {
            Source::Path(path) => read_table(&path),
            Source::Table(rows) => Ok(rows),
        }
    }
}

impl<R> From<PathBuf> for Source<R> {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl<R> From<&Path> for Source<R> {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl<R> From<Vec<R>> for Source<R> {
    fn from(rows: Vec<R>) -> Self {
        Source::Table(rows)
    }
}

/// Read a CSV table with a header row into typed rows
pub fn read_table<R: TableRow>(path: &Path) -> Result<Vec<R>, EtlError> {
    let input_error = |source| EtlError::InputType {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(input_error)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(input_error)?;

    debug!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlaceId, Review};

    #[test]
    fn test_read_legacy_place_id_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("place_ids.csv");
        std::fs::write(&path, "Google Place ID\nChIJ1\nChIJ2\n").unwrap();

        let rows: Vec<PlaceId> = read_table(&path).unwrap();

        assert_eq!(rows, vec![PlaceId::new("ChIJ1"), PlaceId::new("ChIJ2")]);
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let source: Source<PlaceId> = Source::Path(dir.path().join("absent.csv"));

        let err = source.resolve().unwrap_err();

        assert!(matches!(err, EtlError::InputType { .. }));
    }

    #[test]
    fn test_wrong_shape_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(&path, "place_id,place_name\np1,Cafe X\n").unwrap();

        let err = read_table::<Review>(&path).unwrap_err();

        assert!(matches!(err, EtlError::InputType { .. }));
    }

    #[test]
    fn test_in_memory_table_passes_through() {
        let rows = vec![PlaceId::new("ChIJ1")];
        let source: Source<PlaceId> = rows.clone().into();
        assert_eq!(source.resolve().unwrap(), rows);
    }
}
