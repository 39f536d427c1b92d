use crate::browser::{BrowserSession, LaunchOptions};
use crate::error::LiftError;
use crate::library::ComponentLibrary;
use crate::preview::PreviewConfig;
use crate::tools::{ToolContext, ToolRegistry, ToolResult};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool_handler};
use std::sync::{Arc, Mutex};

/// MCP server exposing the sitelift tools.
///
/// The browser is launched on the first call that needs one and shared by
/// every clone of the server.
#[derive(Clone)]
pub struct SiteliftServer {
    session: Arc<Mutex<Option<BrowserSession>>>,
    options: LaunchOptions,
    library: ComponentLibrary,
    preview: PreviewConfig,
    registry: Arc<ToolRegistry>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl SiteliftServer {
    /// Server with default launch options and library location
    pub fn new() -> Self {
        Self::with_options(LaunchOptions::default(), ComponentLibrary::default())
    }

    pub fn with_options(options: LaunchOptions, library: ComponentLibrary) -> Self {
        Self {
            session: Arc::new(Mutex::new(None)),
            options,
            library,
            preview: PreviewConfig::default(),
            registry: Arc::new(ToolRegistry::with_defaults()),
            tool_router: Self::tool_router(),
        }
    }

    /// Use an already running browser
    pub fn with_session(session: BrowserSession, library: ComponentLibrary) -> Self {
        let server = Self::with_options(session.options().clone(), library);
        if let Ok(mut slot) = server.session.lock() {
            *slot = Some(session);
        }
        server
    }

    pub fn preview_config(mut self, preview: PreviewConfig) -> Self {
        self.preview = preview;
        self
    }

    pub fn library(&self) -> &ComponentLibrary {
        &self.library
    }

    /// Whether a browser has been launched or attached
    pub fn has_browser(&self) -> bool {
        self.session.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Access the tool router for introspection
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    /// Run a registry tool and convert its result for MCP
    ///
    /// The session lock is only taken for tools that drive the browser.
    pub(crate) fn run(
        &self,
        name: &str,
        params: serde_json::Value,
    ) -> Result<CallToolResult, McpError> {
        let needs_browser = self.registry.get(name).is_some_and(|t| t.needs_browser());
        let context = ToolContext::new(&self.library).with_preview(self.preview.clone());

        if !needs_browser {
            return self.execute(name, params, context);
        }

        let mut guard = self.session.lock().map_err(|e| {
            McpError::internal_error(format!("browser session lock poisoned: {}", e), None)
        })?;

        if guard.is_none() {
            let session = BrowserSession::launch(self.options.clone()).map_err(to_mcp_error)?;
            *guard = Some(session);
        }

        match guard.as_ref() {
            Some(session) => self.execute(name, params, context.with_session(session)),
            None => self.execute(name, params, context),
        }
    }

    fn execute(
        &self,
        name: &str,
        params: serde_json::Value,
        mut context: ToolContext<'_>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .registry
            .execute(name, params, &mut context)
            .map_err(to_mcp_error)?;
        convert_result(result)
    }
}

impl Default for SiteliftServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_mcp_error(err: LiftError) -> McpError {
    match err {
        LiftError::InvalidArgument(msg) | LiftError::InvalidUrl(msg) => {
            McpError::invalid_params(msg, None)
        }
        other => McpError::internal_error(other.to_string(), None),
    }
}

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: ToolResult) -> Result<CallToolResult, McpError> {
    if !result.success {
        let message = result.error.unwrap_or_else(|| "Unknown error".to_string());
        return Ok(CallToolResult::error(vec![Content::text(message)]));
    }

    let text = match result.data {
        Some(data) => serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string()),
        None => "Success".to_string(),
    };

    let mut content = vec![Content::text(text)];
    if let Some(png) = result.image {
        content.push(Content::image(png, "image/png"));
    }
    Ok(CallToolResult::success(content))
}

#[tool_handler]
impl ServerHandler for SiteliftServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Turn web pages into React components. Use fetch_page (or detect_sections \
                 on raw HTML) to split a page into sections, extract_code to pull code out of \
                 generation output, preview_component to render it in an isolated browser tab, \
                 export_sandbox to package it, and save_component / search_components / \
                 delete_component to manage the library."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
