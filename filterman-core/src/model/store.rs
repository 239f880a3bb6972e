use chrono::{DateTime, Utc};

use super::{Area, AreaHandle, SubArea, SubAreaHandle};
use crate::error::{FilterError, Result};

/// Read-only snapshot of one area, taken at flush time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaView {
    pub id: String,
    pub sub_areas: Vec<String>,
}

/// Ordered collection of areas; insertion order is display and export order
#[derive(Debug, Clone)]
pub struct FilterStore {
    areas: Vec<Area>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    revision: u64,
    saved_revision: u64,
}

impl FilterStore {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            areas: Vec::new(),
            created_at: now,
            updated_at: now,
            revision: 0,
            saved_revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now();
    }

    pub fn add_area(&mut self, id: impl Into<String>) -> AreaHandle {
        let area = Area::new(id.into());
        let handle = area.handle;
        self.areas.push(area);
        self.touch();
        handle
    }

    pub fn add_sub_area(
        &mut self,
        area: AreaHandle,
        token: impl Into<String>,
    ) -> Result<SubAreaHandle> {
        let entry = SubArea::new(token.into());
        let handle = entry.handle;
        self.area_mut(area)?.sub_areas.push(entry);
        self.touch();
        Ok(handle)
    }

    pub fn remove_sub_area(
        &mut self,
        area: AreaHandle,
        sub_area: SubAreaHandle,
    ) -> Result<SubArea> {
        let entry = self.area_mut(area)?;
        let pos = entry
            .sub_areas
            .iter()
            .position(|s| s.handle == sub_area)
            .ok_or(FilterError::NotFound { area, sub_area })?;
        let removed = entry.sub_areas.remove(pos);
        self.touch();
        Ok(removed)
    }

    /// Remove an area together with all of its sub-areas
    pub fn delete_area(&mut self, area: AreaHandle) -> Result<Area> {
        let pos = self.position(area).ok_or(FilterError::UnknownArea(area))?;
        let removed = self.areas.remove(pos);
        self.touch();
        Ok(removed)
    }

    pub fn set_area_id(&mut self, area: AreaHandle, id: impl Into<String>) -> Result<()> {
        self.area_mut(area)?.id = id.into();
        self.touch();
        Ok(())
    }

    pub fn set_sub_area(
        &mut self,
        area: AreaHandle,
        sub_area: SubAreaHandle,
        token: impl Into<String>,
    ) -> Result<()> {
        let entry = self
            .area_mut(area)?
            .sub_area_mut(sub_area)
            .ok_or(FilterError::NotFound { area, sub_area })?;
        entry.token = token.into();
        self.touch();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.areas.clear();
        self.touch();
    }

    pub fn area(&self, handle: AreaHandle) -> Option<&Area> {
        self.areas.iter().find(|a| a.handle == handle)
    }

    fn area_mut(&mut self, handle: AreaHandle) -> Result<&mut Area> {
        self.areas
            .iter_mut()
            .find(|a| a.handle == handle)
            .ok_or(FilterError::UnknownArea(handle))
    }

    pub fn position(&self, handle: AreaHandle) -> Option<usize> {
        self.areas.iter().position(|a| a.handle == handle)
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Current id and sub-area text of every area, trimmed, in store order
    pub fn iterate(&self) -> Vec<AreaView> {
        self.areas
            .iter()
            .map(|a| AreaView {
                id: a.id.trim().to_string(),
                sub_areas: a.sub_areas.iter().map(|s| s.token.trim().to_string()).collect(),
            })
            .collect()
    }

    /// True when the store changed since it was last saved or loaded
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn mark_saved(&mut self) {
        self.saved_revision = self.revision;
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}
