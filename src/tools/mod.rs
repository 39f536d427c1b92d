//! Tool system exposing every sitelift operation by name.
//!
//! Each tool takes typed, JSON-Schema-described parameters and returns a
//! [`ToolResult`]. The [`ToolRegistry`] dispatches raw JSON to the right tool;
//! the MCP server and the CLI both go through it.

pub mod code;
pub mod export;
pub mod library;
pub mod page;
pub mod preview;
pub mod sections;
pub mod utils;

pub use code::{ComponentMetadataTool, ExtractCodeTool};
pub use export::ExportSandboxTool;
pub use library::{DeleteComponentTool, SaveComponentTool, SearchComponentsTool};
pub use page::FetchPageTool;
pub use preview::PreviewComponentTool;
pub use sections::DetectSectionsTool;

use crate::browser::BrowserSession;
use crate::error::{LiftError, Result};
use crate::library::ComponentLibrary;
use crate::preview::PreviewConfig;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Base64-encoded PNG attached to the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn success_with<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Attach a PNG image
    pub fn with_png(mut self, png: &[u8]) -> Self {
        self.image = Some(STANDARD.encode(png));
        self
    }
}

/// What a tool may use while it runs
pub struct ToolContext<'a> {
    session: Option<&'a BrowserSession>,
    pub library: &'a ComponentLibrary,
    pub preview: PreviewConfig,
}

impl<'a> ToolContext<'a> {
    /// Context without a browser; tools that need one fail
    pub fn new(library: &'a ComponentLibrary) -> Self {
        Self {
            session: None,
            library,
            preview: PreviewConfig::default(),
        }
    }

    pub fn with_session(mut self, session: &'a BrowserSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_preview(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// The browser session, or an error naming `tool`
    pub fn session(&self, tool: &str) -> Result<&'a BrowserSession> {
        self.session.ok_or_else(|| LiftError::ToolExecutionFailed {
            tool: tool.to_string(),
            reason: "no browser session available".to_string(),
        })
    }
}

/// A named operation with typed parameters
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Whether the tool needs a browser session
    fn needs_browser(&self) -> bool {
        false
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;
}

/// Object-safe view of a [`Tool`]
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn needs_browser(&self) -> bool;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn needs_browser(&self) -> bool {
        Tool::needs_browser(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed: T::Params = serde_json::from_value(params)
            .map_err(|e| LiftError::InvalidArgument(format!("{}: {}", Tool::name(self), e)))?;
        self.execute_typed(typed, context)
    }
}

/// Tools by name, in registration order
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: IndexMap::new() }
    }

    /// Registry holding every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(FetchPageTool);
        registry.register(DetectSectionsTool);
        registry.register(ExtractCodeTool);
        registry.register(ComponentMetadataTool);
        registry.register(PreviewComponentTool);
        registry.register(ExportSandboxTool);
        registry.register(SaveComponentTool);
        registry.register(SearchComponentsTool);
        registry.register(DeleteComponentTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run `name` with raw JSON parameters
    pub fn execute(
        &self,
        name: &str,
        params: Value,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| LiftError::ToolNotFound(name.to_string()))?;
        log::debug!("executing tool {}", name);
        tool.execute(params, context)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
