//! Whole-file save and load

use std::fs;
use std::path::Path;

use tracing::info;

use crate::codec::Format;
use crate::error::{FilterError, Result};
use crate::model::FilterStore;

/// Write the full store to `path` and mark it saved
pub fn save(store: &mut FilterStore, path: &Path, format: Format) -> Result<()> {
    let text = format.encode(store)?;
    fs::write(path, text).map_err(|source| FilterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    store.mark_saved();

    info!(path = %path.display(), format = format.as_str(), areas = store.len(), "saved filters");
    Ok(())
}

/// Read a store from `path`; the caller decides whether to replace its own
pub fn load(path: &Path, format: Format) -> Result<FilterStore> {
    let text = fs::read_to_string(path).map_err(|source| FilterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let store = format.decode(&text)?;

    info!(path = %path.display(), format = format.as_str(), areas = store.len(), "loaded filters");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filters.json");

        let mut store = FilterStore::new();
        let a = store.add_area("A1");
        store.add_sub_area(a, "*").unwrap();
        save(&mut store, &path, Format::Json).unwrap();
        assert!(!store.is_dirty());

        let loaded = load(&path, Format::Json).unwrap();
        assert_eq!(loaded.iterate()[0].sub_areas, vec!["00-100"]);
    }

    #[test]
    fn test_save_and_load_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filters.txt");

        let mut store = FilterStore::new();
        let a = store.add_area("A1");
        store.add_sub_area(a, "3").unwrap();
        save(&mut store, &path, Format::Lines).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "A1:3\n");
        assert_eq!(load(&path, Format::Lines).unwrap().iterate(), store.iterate());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("missing.json"), Format::Json).unwrap_err();
        assert_eq!(err.code(), "io");
    }
}
