//! File encodings for a [`FilterStore`]
//!
//! Two formats are supported: a JSON object mapping area ids to sub-area
//! lists, and a plain text file with one `area:sub,sub` record per line.
//! Both expand the `*` wildcard on the way out.

pub mod json;
pub mod lines;

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::FilterStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Lines,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Lines => "lines",
        }
    }

    /// Guess the format from a file extension; `None` when there is none
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Format::Json)
        } else {
            Some(Format::Lines)
        }
    }

    pub fn encode(&self, store: &FilterStore) -> Result<String> {
        match self {
            Format::Json => json::to_string(store),
            Format::Lines => Ok(lines::to_string(store)),
        }
    }

    pub fn decode(&self, text: &str) -> Result<FilterStore> {
        match self {
            Format::Json => json::from_str(text),
            Format::Lines => lines::from_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/filters.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("filters.JSON")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("filters.txt")), Some(Format::Lines));
        assert_eq!(Format::from_path(Path::new("filters")), None);
    }

    #[test]
    fn test_formats_decode_what_they_encode() {
        let mut store = FilterStore::new();
        let a = store.add_area("A1");
        store.add_sub_area(a, "2").unwrap();

        for format in [Format::Json, Format::Lines] {
            let text = format.encode(&store).unwrap();
            let loaded = format.decode(&text).unwrap();
            assert_eq!(loaded.iterate(), store.iterate(), "{}", format.as_str());
        }
    }
}
