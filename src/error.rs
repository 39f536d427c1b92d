use thiserror::Error;

/// Errors surfaced by sitelift operations
#[derive(Error, Debug)]
pub enum LiftError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Page too large ({size_kb}KB). Try a simpler page.")]
    PageTooLarge { size_kb: usize },

    #[error("Component library error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error(transparent)]
    Preview(#[from] PreviewError),
}

/// Failures shown inside the rendering surface.
///
/// The `Display` output is the exact alert text the surface presents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    #[error("No code received.")]
    NoCode,

    #[error("Generated code did not export a component.")]
    MissingExport,

    #[error("Preview error: {0}")]
    Script(String),

    #[error("Libraries not loaded. Try refreshing the page.")]
    LibrariesNotLoaded,
}

/// Result type alias for sitelift operations
pub type Result<T> = std::result::Result<T, LiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_error_messages() {
        assert_eq!(PreviewError::NoCode.to_string(), "No code received.");
        assert_eq!(
            PreviewError::MissingExport.to_string(),
            "Generated code did not export a component."
        );
        assert_eq!(
            PreviewError::Script("Unexpected token (1:5)".into()).to_string(),
            "Preview error: Unexpected token (1:5)"
        );
    }

    #[test]
    fn test_preview_error_is_transparent() {
        let err: LiftError = PreviewError::LibrariesNotLoaded.into();
        assert_eq!(err.to_string(), "Libraries not loaded. Try refreshing the page.");
    }

    #[test]
    fn test_tool_failure_message() {
        let err = LiftError::ToolExecutionFailed {
            tool: "preview_component".into(),
            reason: "no browser".into(),
        };
        assert_eq!(err.to_string(), "Tool 'preview_component' failed: no browser");
    }
}
