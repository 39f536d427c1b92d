use crate::dom::section::Section;
use indexmap::IndexMap;

/// Outcome of offering a section to a [`SectionSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The section was appended
    Accepted,
    /// A section with the same signature is already present
    Duplicate,
    /// The set already holds its maximum number of sections
    Full,
}

/// Ordered, capped collection of sections keyed by their de-duplication signature.
/// Uses IndexMap to preserve document order.
#[derive(Debug, Clone)]
pub struct SectionSet {
    /// Map from signature to section
    map: IndexMap<String, Section>,

    /// Maximum number of sections accepted
    capacity: usize,
}

impl SectionSet {
    /// Create an empty set accepting at most `capacity` sections
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IndexMap::new(),
            capacity,
        }
    }

    /// Offer a section under the given signature
    pub fn offer(&mut self, key: impl Into<String>, section: Section) -> Admission {
        if self.is_full() {
            return Admission::Full;
        }
        let key = key.into();
        if self.map.contains_key(&key) {
            return Admission::Duplicate;
        }
        self.map.insert(key, section);
        Admission::Accepted
    }

    /// Whether the cap has been reached
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.capacity
    }

    /// Check if a signature was already accepted
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over sections in insertion order
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.map.values()
    }

    /// Consume the set, yielding sections in insertion order
    pub fn into_sections(self) -> Vec<Section> {
        self.map.into_values().collect()
    }
}
