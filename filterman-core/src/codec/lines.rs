//! Line format: one `AREA:SUB,SUB,...` record per line
//!
//! Areas with an empty id or no sub-areas are not written at all, unlike the
//! JSON format which writes them with the wildcard range.

use tracing::warn;

use crate::error::{FilterError, Result};
use crate::model::{normalize, FilterStore};

pub fn serialize(store: &FilterStore) -> Vec<String> {
    let mut lines = Vec::new();
    let mut skipped = 0;

    for view in store.iterate() {
        if view.id.is_empty() || view.sub_areas.is_empty() {
            skipped += 1;
            continue;
        }
        let sub_areas: Vec<&str> = view.sub_areas.iter().map(|s| normalize(s)).collect();
        lines.push(format!("{}:{}", view.id, sub_areas.join(",")));
    }

    if skipped > 0 {
        warn!(skipped, "areas without an id or sub-areas are not written in line format");
    }
    lines
}

/// Newline terminated text of [`serialize`]
pub fn to_string(store: &FilterStore) -> String {
    serialize(store)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

/// Parse a whole file. Blank lines are ignored; any malformed record fails
/// the load and no store is returned.
pub fn deserialize<'a, I>(lines: I) -> Result<FilterStore>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut entries = Vec::new();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (area, rest) = line
            .split_once(':')
            .ok_or_else(|| FilterError::malformed_line(line_no, "missing ':' separator"))?;
        let area = area.trim();
        let rest = rest.trim();
        if area.is_empty() {
            return Err(FilterError::malformed_line(line_no, "empty area id"));
        }
        if rest.is_empty() {
            return Err(FilterError::malformed_line(line_no, "no sub-areas"));
        }

        let sub_areas: Vec<String> = rest.split(',').map(|s| s.trim().to_string()).collect();
        entries.push((area.to_string(), sub_areas));
    }

    let mut store = FilterStore::new();
    for (area, sub_areas) in entries {
        let handle = store.add_area(area);
        for token in sub_areas {
            store.add_sub_area(handle, token)?;
        }
    }
    store.mark_saved();
    Ok(store)
}

pub fn from_str(text: &str) -> Result<FilterStore> {
    deserialize(text.lines())
}
