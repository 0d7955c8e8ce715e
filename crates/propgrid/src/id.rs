//! Grid and element identifiers.
//!
//! Every render call gets a fresh [`GridId`] from an [`IdAllocator`] owned by
//! the rendering session. Widget element ids are derived from the grid id and
//! the property name, so two grids rendering the same object never collide.

use std::fmt;

/// Identifier of one rendered grid instance (`pg0`, `pg1`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridId(String);

impl GridId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues grid ids for one rendering session.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    prefix: String,
    next: u64,
}

impl IdAllocator {
    /// Create an allocator whose ids start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Allocate the next grid id.
    pub fn allocate(&mut self) -> GridId {
        let id = GridId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new("pg")
    }
}

/// Identity of a widget element: grid id followed by the property name.
///
/// Whitespace in the property name is replaced by `_` so the id stays a
/// single token in markup and selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(grid: &GridId, property: &str) -> Self {
        let normalized: String = property
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        Self(format!("{}{}", grid.as_str(), normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `selector` refers to this element, either as the bare id or as
    /// an `#id` selector.
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        selector.strip_prefix('#').unwrap_or(selector) == self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_sequential() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.allocate().as_str(), "pg0");
        assert_eq!(ids.allocate().as_str(), "pg1");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut a = IdAllocator::new("grid");
        let mut b = IdAllocator::new("grid");
        a.allocate();
        assert_eq!(b.allocate().as_str(), "grid0");
    }

    #[test]
    fn test_element_id_normalizes_whitespace() {
        let grid = IdAllocator::default().allocate();
        let id = ElementId::new(&grid, "first name\tx");
        assert_eq!(id.as_str(), "pg0first_name_x");
    }

    #[test]
    fn test_element_id_selector_matching() {
        let grid = IdAllocator::default().allocate();
        let id = ElementId::new(&grid, "title");
        assert!(id.matches("#pg0title"));
        assert!(id.matches("pg0title"));
        assert!(!id.matches("#pg1title"));
    }
}
