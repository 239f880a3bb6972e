use crate::model::{AreaHandle, FilterStore, SubAreaHandle};

/// One visible line of the editor: an area header or one of its sub-areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Area(AreaHandle),
    SubArea(AreaHandle, SubAreaHandle),
}

impl Row {
    pub fn area(&self) -> AreaHandle {
        match self {
            Row::Area(area) | Row::SubArea(area, _) => *area,
        }
    }
}

/// Lay the store out as editor rows, sub-areas directly under their area
pub fn rows(store: &FilterStore) -> Vec<Row> {
    let mut rows = Vec::new();
    for area in store.areas() {
        rows.push(Row::Area(area.handle));
        rows.extend(area.sub_areas.iter().map(|s| Row::SubArea(area.handle, s.handle)));
    }
    rows
}

/// Selected row index, kept inside the current row count
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub row: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self { row: 0 }
    }

    pub fn current(&self, store: &FilterStore) -> Option<Row> {
        rows(store).get(self.row).copied()
    }

    pub fn move_down(&mut self, store: &FilterStore) {
        let count = rows(store).len();
        if count > 0 {
            self.row = (self.row + 1) % count;
        }
    }

    pub fn move_up(&mut self, store: &FilterStore) {
        let count = rows(store).len();
        if count > 0 {
            self.row = if self.row == 0 { count - 1 } else { self.row - 1 };
        }
    }

    pub fn move_to_top(&mut self) {
        self.row = 0;
    }

    pub fn move_to_bottom(&mut self, store: &FilterStore) {
        self.row = rows(store).len().saturating_sub(1);
    }

    /// Point at `target` if it is still on screen
    pub fn select(&mut self, store: &FilterStore, target: Row) {
        if let Some(pos) = rows(store).iter().position(|r| *r == target) {
            self.row = pos;
        }
    }

    /// Pull the selection back after rows were removed
    pub fn clamp(&mut self, store: &FilterStore) {
        let count = rows(store).len();
        if self.row >= count {
            self.row = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_layout() {
        let mut store = FilterStore::new();
        let a = store.add_area("A1");
        let s = store.add_sub_area(a, "1").unwrap();
        let b = store.add_area("B1");

        assert_eq!(rows(&store), vec![Row::Area(a), Row::SubArea(a, s), Row::Area(b)]);
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut store = FilterStore::new();
        let a = store.add_area("A1");
        let b = store.add_area("B1");
        let mut sel = Selection::new();

        sel.move_up(&store);
        assert_eq!(sel.current(&store), Some(Row::Area(b)));
        sel.move_down(&store);
        assert_eq!(sel.current(&store), Some(Row::Area(a)));

        sel.move_to_bottom(&store);
        store.delete_area(b).unwrap();
        sel.clamp(&store);
        assert_eq!(sel.current(&store), Some(Row::Area(a)));
    }

    #[test]
    fn test_selection_on_empty_store() {
        let store = FilterStore::new();
        let mut sel = Selection::new();
        sel.move_down(&store);
        sel.clamp(&store);
        assert_eq!(sel.row, 0);
        assert_eq!(sel.current(&store), None);
    }
}
