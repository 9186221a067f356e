//! Reading records and columns from JSON files

use crate::error::DashboardError;
use pe_model::{ColumnSet, DataSet};
use std::path::Path;

/// Read a JSON array of records
pub fn read_data_set(path: impl AsRef<Path>) -> Result<DataSet, DashboardError> {
    let path = path.as_ref();
    let text = read(path)?;
    let data = DataSet::from_json(&text).map_err(|source| DashboardError::Data {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = data.len(), "loaded records");
    Ok(data)
}

/// Read a JSON array of column definitions
pub fn read_columns(path: impl AsRef<Path>) -> Result<ColumnSet, DashboardError> {
    let path = path.as_ref();
    let text = read(path)?;
    ColumnSet::from_json(&text).map_err(|source| DashboardError::Data {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, DashboardError> {
    std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_records_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "title": "A"}}, {{"id": 2, "title": "B"}}]"#).unwrap();

        let data = read_data_set(file.path()).unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn duplicate_ids_name_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1}}, {{"id": 1}}]"#).unwrap();

        let err = read_data_set(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::Data { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_columns(dir.path().join("columns.json")).unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }

    #[test]
    fn reads_columns_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"key": "title", "label": "Title", "type": "string", "isSortable": true}}]"#
        )
        .unwrap();

        let columns = read_columns(file.path()).unwrap();
        assert!(columns.is_sortable("title"));
    }
}
