use serde::{Deserialize, Serialize};

/// Message exchanged between a host and its rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PreviewMessage {
    /// Host to surface: source to render
    #[serde(rename = "PREVIEW_CODE")]
    Code { code: String },

    /// Surface to host: runtime dependencies are loaded
    #[serde(rename = "PREVIEW_READY")]
    Ready,
}

impl PreviewMessage {
    pub fn code(code: impl Into<String>) -> Self {
        Self::Code { code: code.into() }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Identifies one rendering surface owned by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);
