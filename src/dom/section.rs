use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A contiguous, independently convertible region of a page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct Section {
    /// Identifier unique within one segmentation run (e.g. "section-3-pricing")
    pub id: String,

    /// Human-readable role of the region ("Hero", "Pricing", a heading, ...)
    pub label: String,

    /// Serialized outer markup of the region
    pub html: String,
}

/// Payload handed to an external code-generation step for one section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct SectionRequest {
    pub html: String,
    pub label: String,
}

impl Section {
    /// Create a new Section
    pub fn new(id: impl Into<String>, label: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            html: html.into(),
        }
    }

    /// Build the id for a section from its candidate index and label
    pub fn make_id(index: usize, label: &str) -> String {
        let slug = label.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase();
        format!("section-{}-{}", index, slug)
    }

    /// The degenerate whole-document section
    pub fn full_page(html: impl Into<String>) -> Self {
        Self::new("section-0-full", "Full page", html)
    }

    /// Length of the serialized markup in characters
    pub fn html_len(&self) -> usize {
        self.html.chars().count()
    }

    /// Payload for generating a component from this section
    pub fn request(&self) -> SectionRequest {
        SectionRequest {
            html: self.html.clone(),
            label: self.label.clone(),
        }
    }
}
