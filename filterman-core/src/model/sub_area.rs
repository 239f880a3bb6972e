use std::fmt;

use uuid::Uuid;

/// Sub-area token meaning "the whole area"
pub const WILDCARD: &str = "*";

/// What the wildcard becomes once a value leaves the editor
pub const WILDCARD_RANGE: &str = "00-100";

/// Expand the wildcard marker; every other token is returned unchanged
pub fn normalize(token: &str) -> &str {
    if token == WILDCARD {
        WILDCARD_RANGE
    } else {
        token
    }
}

/// Opaque identifier of a sub-area entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubAreaHandle(Uuid);

impl SubAreaHandle {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubAreaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sub-area entry owned by exactly one area
#[derive(Debug, Clone)]
pub struct SubArea {
    pub handle: SubAreaHandle,
    /// Text as typed; the wildcard stays `*` here
    pub token: String,
}

impl SubArea {
    pub fn new(token: String) -> Self {
        Self {
            handle: SubAreaHandle::new(),
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_wildcard() {
        assert_eq!(normalize("*"), "00-100");
        assert_eq!(normalize("12"), "12");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" * "), " * ");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for token in ["*", "00-100", "5", "", "**", "a*"] {
            assert_eq!(normalize(normalize(token)), normalize(token));
        }
    }

    #[test]
    fn test_sub_area_handles_are_unique() {
        let a = SubArea::new("1".to_string());
        let b = SubArea::new("1".to_string());
        assert_ne!(a.handle, b.handle);
    }
}
