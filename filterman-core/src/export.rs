//! Flattening of the store into positionally paired export lists

use serde::Serialize;

use crate::model::{normalize, FilterStore, WILDCARD_RANGE};

/// `areas[i]` belongs with `sub_areas[i]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flattened {
    pub areas: Vec<String>,
    pub sub_areas: Vec<String>,
}

impl Flattened {
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Areas as pasted elsewhere: comma separated, no spaces
    pub fn areas_joined(&self) -> String {
        self.areas.join(",")
    }

    pub fn sub_areas_joined(&self) -> String {
        self.sub_areas.join(",")
    }
}

/// One pair per sub-area, or a single wildcard pair for an area without any
pub fn flatten(store: &FilterStore) -> Flattened {
    let mut out = Flattened::default();

    for view in store.iterate() {
        if view.sub_areas.is_empty() {
            out.areas.push(view.id);
            out.sub_areas.push(WILDCARD_RANGE.to_string());
            continue;
        }
        for sub_area in &view.sub_areas {
            out.areas.push(view.id.clone());
            out.sub_areas.push(normalize(sub_area).to_string());
        }
    }

    out
}

pub fn to_json(flattened: &Flattened) -> serde_json::Result<String> {
    serde_json::to_string_pretty(flattened)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_pairs_areas_and_sub_areas() {
        let mut store = FilterStore::new();
        let a = store.add_area("A1");
        store.add_sub_area(a, "1").unwrap();
        store.add_sub_area(a, "*").unwrap();
        store.add_area("B2");

        let flat = flatten(&store);
        assert_eq!(flat.areas, vec!["A1", "A1", "B2"]);
        assert_eq!(flat.sub_areas, vec!["1", "00-100", "00-100"]);
        assert_eq!(flat.areas_joined(), "A1,A1,B2");
        assert_eq!(flat.sub_areas_joined(), "1,00-100,00-100");
    }

    #[test]
    fn test_flatten_length_invariant() {
        let mut store = FilterStore::new();
        let counts = [0usize, 3, 1, 0, 2];
        for (i, count) in counts.iter().enumerate() {
            let area = store.add_area(format!("Z{}", i));
            for n in 0..*count {
                store.add_sub_area(area, n.to_string()).unwrap();
            }
        }

        let flat = flatten(&store);
        let expected: usize = counts.iter().map(|c| (*c).max(1)).sum();
        assert_eq!(flat.areas.len(), expected);
        assert_eq!(flat.sub_areas.len(), expected);
    }

    #[test]
    fn test_flatten_empty_store() {
        let flat = flatten(&FilterStore::new());
        assert!(flat.is_empty());
        assert_eq!(flat.areas_joined(), "");
    }

    #[test]
    fn test_json_uses_camel_case() {
        let mut store = FilterStore::new();
        store.add_area("A1");
        let json = to_json(&flatten(&store)).unwrap();
        assert!(json.contains("\"subAreas\""));
    }
}
