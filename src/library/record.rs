use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A component kept in the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedComponent {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_variant: Option<String>,
    /// Milliseconds since the Unix epoch
    pub created_at: u64,
}

impl SavedComponent {
    /// Case-insensitive substring match over name, section label and code.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .section_label
                .as_deref()
                .is_some_and(|label| label.to_lowercase().contains(needle))
            || self.code.to_lowercase().contains(needle)
    }
}

/// Fields supplied by the caller when saving; the library assigns the rest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub section_label: Option<String>,
    #[serde(default)]
    pub original_html: Option<String>,
    #[serde(default)]
    pub style_variant: Option<String>,
}

impl NewComponent {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn section_label(mut self, label: impl Into<String>) -> Self {
        self.section_label = Some(label.into());
        self
    }

    pub fn original_html(mut self, html: impl Into<String>) -> Self {
        self.original_html = Some(html.into());
        self
    }

    pub fn style_variant(mut self, variant: impl Into<String>) -> Self {
        self.style_variant = Some(variant.into());
        self
    }

    pub(crate) fn into_saved(self, id: String, created_at: u64) -> SavedComponent {
        SavedComponent {
            id,
            name: self.name,
            code: self.code,
            section_label: self.section_label,
            original_html: self.original_html,
            style_variant: self.style_variant,
            created_at,
        }
    }
}
