use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec::Format;
use crate::cursor::{Row, Selection};
use crate::error::Result;
use crate::export::{self, Flattened};
use crate::io;
use crate::model::{AreaHandle, FilterStore, SubAreaHandle};
use crate::spec;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
    ConfirmLoad,
    Help,
}

/// What the text in the input box will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    AreaSpec,
    AreaId(AreaHandle),
    SubArea(AreaHandle, SubAreaHandle),
    SavePath,
    LoadPath,
}

/// Platform-agnostic editing session
pub struct App {
    pub store: FilterStore,
    pub selection: Selection,
    pub mode: Mode,
    pub running: bool,

    // Input state
    pub input_buffer: String,
    pub input_target: InputTarget,

    // File state
    pub file_path: Option<PathBuf>,
    /// Format forced by the user; otherwise picked from the file extension
    pub declared_format: Option<Format>,
    pub default_format: Format,
    pub pending_load: Option<PathBuf>,

    pub status_message: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            store: FilterStore::new(),
            selection: Selection::new(),
            mode: Mode::Normal,
            running: true,

            input_buffer: String::new(),
            input_target: InputTarget::AreaSpec,

            file_path: None,
            declared_format: None,
            default_format: Format::default(),
            pending_load: None,

            status_message: None,
        }
    }

    /// Parse a spec and append one area per expanded id. Empty input adds nothing.
    pub fn enter_area_spec(&mut self, raw: &str) -> Vec<AreaHandle> {
        if raw.is_empty() {
            return Vec::new();
        }

        let handles: Vec<AreaHandle> = spec::parse(raw)
            .into_iter()
            .map(|id| self.store.add_area(id))
            .collect();
        debug!(spec = raw, added = handles.len(), "expanded area spec");

        if let Some(first) = handles.first() {
            self.selection.select(&self.store, Row::Area(*first));
        }
        handles
    }

    /// Append a blank sub-area for the user to fill in
    pub fn add_sub_area(&mut self, area: AreaHandle) -> Result<SubAreaHandle> {
        self.add_sub_area_with(area, "")
    }

    pub fn add_sub_area_with(&mut self, area: AreaHandle, token: &str) -> Result<SubAreaHandle> {
        let handle = self.store.add_sub_area(area, token)?;
        debug!(%area, sub_area = %handle, "added sub-area");
        Ok(handle)
    }

    pub fn edit_area_id(&mut self, area: AreaHandle, id: &str) -> Result<()> {
        self.store.set_area_id(area, id)
    }

    pub fn edit_sub_area(
        &mut self,
        area: AreaHandle,
        sub_area: SubAreaHandle,
        token: &str,
    ) -> Result<()> {
        self.store.set_sub_area(area, sub_area, token)
    }

    pub fn remove_sub_area(&mut self, area: AreaHandle, sub_area: SubAreaHandle) -> Result<()> {
        self.store.remove_sub_area(area, sub_area)?;
        self.selection.clamp(&self.store);
        debug!(%area, %sub_area, "removed sub-area");
        Ok(())
    }

    pub fn delete_area(&mut self, area: AreaHandle) -> Result<()> {
        self.store.delete_area(area)?;
        self.selection.clamp(&self.store);
        debug!(%area, "deleted area");
        Ok(())
    }

    /// Declared format first, then the file extension, then the default
    pub fn format_for(&self, path: &Path) -> Format {
        self.declared_format
            .or_else(|| Format::from_path(path))
            .unwrap_or(self.default_format)
    }

    pub fn request_save(&mut self, path: &Path, format: Option<Format>) -> Result<Format> {
        let format = format.unwrap_or_else(|| self.format_for(path));
        io::save(&mut self.store, path, format)?;
        self.file_path = Some(path.to_path_buf());
        Ok(format)
    }

    /// Replace the whole store with the file's contents. On error the
    /// current store is left as it was.
    pub fn request_load(&mut self, path: &Path, format: Option<Format>) -> Result<Format> {
        let format = format.unwrap_or_else(|| self.format_for(path));
        self.store = io::load(path, format)?;
        self.selection = Selection::new();
        self.file_path = Some(path.to_path_buf());
        Ok(format)
    }

    /// Loading over unsaved edits discards them, so ask first
    pub fn needs_load_confirmation(&self) -> bool {
        !self.store.is_empty() && self.store.is_dirty()
    }

    pub fn request_export(&self) -> Flattened {
        export::flatten(&self.store)
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.selection.current(&self.store)
    }

    pub fn select_next(&mut self) {
        self.selection.move_down(&self.store);
    }

    pub fn select_prev(&mut self) {
        self.selection.move_up(&self.store);
    }

    pub fn select_top(&mut self) {
        self.selection.move_to_top();
    }

    pub fn select_bottom(&mut self) {
        self.selection.move_to_bottom(&self.store);
    }

    /// Open the input box, pre-filled with the text being edited
    pub fn start_input(&mut self, target: InputTarget) {
        self.input_buffer = match target {
            InputTarget::AreaId(area) => self
                .store
                .area(area)
                .map(|a| a.id.clone())
                .unwrap_or_default(),
            InputTarget::SubArea(area, sub_area) => self
                .store
                .area(area)
                .and_then(|a| a.sub_area(sub_area))
                .map(|s| s.token.clone())
                .unwrap_or_default(),
            InputTarget::SavePath => self
                .file_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            InputTarget::AreaSpec | InputTarget::LoadPath => String::new(),
        };
        self.input_target = target;
        self.mode = Mode::Input;
    }

    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.mode = Mode::Normal;
    }

    /// Apply the input box to its target
    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input_buffer);
        self.mode = Mode::Normal;

        let result = match self.input_target {
            InputTarget::AreaSpec => {
                let added = self.enter_area_spec(&text).len();
                self.set_status(&format!("Added {} area(s)", added));
                Ok(())
            }
            InputTarget::AreaId(area) => self.edit_area_id(area, &text),
            InputTarget::SubArea(area, sub_area) => self.edit_sub_area(area, sub_area, &text),
            InputTarget::SavePath => {
                if text.trim().is_empty() {
                    self.set_status("Save cancelled");
                    Ok(())
                } else {
                    self.save_to(PathBuf::from(text.trim()));
                    Ok(())
                }
            }
            InputTarget::LoadPath => {
                if text.trim().is_empty() {
                    self.set_status("Load cancelled");
                } else {
                    self.begin_load(PathBuf::from(text.trim()));
                }
                Ok(())
            }
        };

        if let Err(e) = result {
            self.set_status(&format!("Error: {}", e));
        }
    }

    /// Add a blank sub-area under the selected area and start editing it
    pub fn add_sub_area_to_selected(&mut self) {
        let area = match self.selected_row() {
            Some(row) => row.area(),
            None => {
                self.set_status("Add an area first");
                return;
            }
        };

        match self.add_sub_area(area) {
            Ok(sub_area) => {
                self.selection.select(&self.store, Row::SubArea(area, sub_area));
                self.start_input(InputTarget::SubArea(area, sub_area));
            }
            Err(e) => self.set_status(&format!("Error: {}", e)),
        }
    }

    pub fn edit_selected(&mut self) {
        match self.selected_row() {
            Some(Row::Area(area)) => self.start_input(InputTarget::AreaId(area)),
            Some(Row::SubArea(area, sub_area)) => {
                self.start_input(InputTarget::SubArea(area, sub_area))
            }
            None => {}
        }
    }

    /// Delete the selected area, or remove the selected sub-area
    pub fn delete_selected(&mut self) -> bool {
        let result = match self.selected_row() {
            Some(Row::Area(area)) => self.delete_area(area).map(|_| "Area deleted"),
            Some(Row::SubArea(area, sub_area)) => {
                self.remove_sub_area(area, sub_area).map(|_| "Sub-area removed")
            }
            None => return false,
        };

        match result {
            Ok(msg) => {
                self.set_status(msg);
                true
            }
            Err(e) => {
                self.set_status(&format!("Error: {}", e));
                false
            }
        }
    }

    /// Save to the current file, or ask for a path when there is none
    pub fn save(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.save_to(path),
            None => self.start_input(InputTarget::SavePath),
        }
    }

    fn save_to(&mut self, path: PathBuf) {
        match self.request_save(&path, None) {
            Ok(format) => self.set_status(&format!(
                "Saved {} ({})",
                path.display(),
                format.as_str()
            )),
            Err(e) => self.set_status(&format!("Save failed: {}", e)),
        }
    }

    pub fn begin_load(&mut self, path: PathBuf) {
        if self.needs_load_confirmation() {
            self.pending_load = Some(path);
            self.mode = Mode::ConfirmLoad;
        } else {
            self.finish_load(path);
        }
    }

    pub fn confirm_load(&mut self, accept: bool) {
        self.mode = Mode::Normal;
        match self.pending_load.take() {
            Some(path) if accept => self.finish_load(path),
            Some(_) => self.set_status("Load cancelled"),
            None => {}
        }
    }

    fn finish_load(&mut self, path: PathBuf) {
        match self.request_load(&path, None) {
            Ok(_) => self.set_status(&format!("Loaded {}", path.display())),
            Err(e) => self.set_status(&format!("Load failed: {}", e)),
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Get title for display
    pub fn title(&self) -> String {
        let name = self
            .file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string());

        if self.store.is_dirty() {
            format!("{} *", name)
        } else {
            name
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_enter_area_spec_adds_areas() {
        let mut app = App::new();
        let handles = app.enter_area_spec("A1, B1-B3, 5");
        assert_eq!(handles.len(), 5);

        let ids: Vec<_> = app.store.iterate().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["A1", "B1", "B2", "B3", "5"]);
        assert_eq!(app.selected_row(), Some(Row::Area(handles[0])));
    }

    #[test]
    fn test_empty_spec_adds_nothing() {
        let mut app = App::new();
        assert!(app.enter_area_spec("").is_empty());
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_add_sub_area_to_selected_starts_editing() {
        let mut app = App::new();
        let area = app.enter_area_spec("A1")[0];

        app.add_sub_area_to_selected();
        assert_eq!(app.mode, Mode::Input);
        app.input_buffer = "*".to_string();
        app.submit_input();

        assert_eq!(app.store.iterate()[0].sub_areas, vec!["*"]);
        assert_eq!(app.request_export().sub_areas, vec!["00-100"]);
        assert!(matches!(app.selected_row(), Some(Row::SubArea(a, _)) if a == area));
    }

    #[test]
    fn test_delete_selected() {
        let mut app = App::new();
        let area = app.enter_area_spec("A1")[0];
        let sub_area = app.add_sub_area_with(area, "1").unwrap();
        app.selection.select(&app.store, Row::SubArea(area, sub_area));

        assert!(app.delete_selected());
        assert!(app.store.area(area).unwrap().is_wildcard());
        assert!(app.delete_selected());
        assert!(app.store.is_empty());
        assert!(!app.delete_selected());
    }

    #[test]
    fn test_removed_handles_report_errors() {
        let mut app = App::new();
        let area = app.enter_area_spec("A1")[0];
        app.delete_area(area).unwrap();
        assert_eq!(app.add_sub_area(area).unwrap_err().code(), "unknown-area");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filters.txt");

        let mut app = App::new();
        let area = app.enter_area_spec("A1")[0];
        app.add_sub_area_with(area, "2").unwrap();
        assert_eq!(app.request_save(&path, None).unwrap(), Format::Lines);
        assert!(!app.needs_load_confirmation());

        let mut other = App::new();
        other.request_load(&path, None).unwrap();
        assert_eq!(other.store.iterate(), app.store.iterate());
        assert_eq!(other.title(), "filters.txt");
    }

    #[test]
    fn test_failed_load_keeps_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[\"A1\"]").unwrap();

        let mut app = App::new();
        app.enter_area_spec("B7");
        let err = app.request_load(&path, None).unwrap_err();

        assert_eq!(err.code(), "malformed-document");
        assert_eq!(app.store.iterate()[0].id, "B7");
    }

    #[test]
    fn test_load_over_unsaved_changes_asks_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filters.json");
        std::fs::write(&path, "{\"C1\": [\"4\"]}").unwrap();

        let mut app = App::new();
        app.enter_area_spec("A1");
        app.begin_load(path.clone());
        assert_eq!(app.mode, Mode::ConfirmLoad);

        app.confirm_load(false);
        assert_eq!(app.store.iterate()[0].id, "A1");

        app.begin_load(path);
        app.confirm_load(true);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.iterate()[0].id, "C1");
    }

    #[test]
    fn test_declared_format_wins_over_extension() {
        let mut app = App::new();
        assert_eq!(app.format_for(Path::new("f.json")), Format::Json);
        assert_eq!(app.format_for(Path::new("f")), Format::Json);

        app.declared_format = Some(Format::Lines);
        assert_eq!(app.format_for(Path::new("f.json")), Format::Lines);
    }
}
