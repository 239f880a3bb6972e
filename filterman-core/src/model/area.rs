use std::fmt;

use uuid::Uuid;

use super::{SubArea, SubAreaHandle};

/// Opaque identifier of an area entry, stable for the area's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaHandle(Uuid);

impl AreaHandle {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AreaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An area and the sub-areas it is divided into
#[derive(Debug, Clone)]
pub struct Area {
    pub handle: AreaHandle,
    /// Editable id text, read fresh whenever the store is flushed
    pub id: String,
    pub sub_areas: Vec<SubArea>,
}

impl Area {
    pub fn new(id: String) -> Self {
        Self {
            handle: AreaHandle::new(),
            id,
            sub_areas: Vec::new(),
        }
    }

    pub fn sub_area(&self, handle: SubAreaHandle) -> Option<&SubArea> {
        self.sub_areas.iter().find(|s| s.handle == handle)
    }

    pub fn sub_area_mut(&mut self, handle: SubAreaHandle) -> Option<&mut SubArea> {
        self.sub_areas.iter_mut().find(|s| s.handle == handle)
    }

    /// An area without sub-areas covers the whole area
    pub fn is_wildcard(&self) -> bool {
        self.sub_areas.is_empty()
    }
}
