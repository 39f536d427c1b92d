//! MCP (Model Context Protocol) server
//!
//! Each MCP tool forwards its typed parameters to the matching entry in the
//! [`ToolRegistry`](crate::tools::ToolRegistry).

pub mod handler;
pub use handler::SiteliftServer;

use crate::tools::code::{ComponentMetadataParams, ExtractCodeParams};
use crate::tools::export::ExportSandboxParams;
use crate::tools::library::{DeleteComponentParams, SaveComponentParams, SearchComponentsParams};
use crate::tools::page::FetchPageParams;
use crate::tools::preview::PreviewComponentParams;
use crate::tools::sections::DetectSectionsParams;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::{ErrorData as McpError, tool, tool_router};
use serde::Serialize;

fn forward<P: Serialize>(
    server: &SiteliftServer,
    name: &str,
    params: P,
) -> Result<CallToolResult, McpError> {
    let value = serde_json::to_value(params)
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
    server.run(name, value)
}

#[tool_router]
impl SiteliftServer {
    #[tool(description = "Load a public web page and split it into convertible sections")]
    fn fetch_page(
        &self,
        Parameters(params): Parameters<FetchPageParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "fetch_page", params)
    }

    #[tool(description = "Split an HTML document into at most 20 labeled sections")]
    fn detect_sections(
        &self,
        Parameters(params): Parameters<DetectSectionsParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "detect_sections", params)
    }

    #[tool(description = "Extract the code from the first fenced block of generation output")]
    fn extract_code(
        &self,
        Parameters(params): Parameters<ExtractCodeParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "extract_code", params)
    }

    #[tool(description = "Read the component name and prop names from component source")]
    fn component_metadata(
        &self,
        Parameters(params): Parameters<ComponentMetadataParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "component_metadata", params)
    }

    #[tool(description = "Render a React component in an isolated browser tab")]
    fn preview_component(
        &self,
        Parameters(params): Parameters<PreviewComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "preview_component", params)
    }

    #[tool(description = "Package a component as a runnable React project")]
    fn export_sandbox(
        &self,
        Parameters(params): Parameters<ExportSandboxParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "export_sandbox", params)
    }

    #[tool(description = "Save a component to the library")]
    fn save_component(
        &self,
        Parameters(params): Parameters<SaveComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "save_component", params)
    }

    #[tool(description = "Search saved components by name, section label or code")]
    fn search_components(
        &self,
        Parameters(params): Parameters<SearchComponentsParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "search_components", params)
    }

    #[tool(description = "Delete a saved component by id")]
    fn delete_component(
        &self,
        Parameters(params): Parameters<DeleteComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        forward(self, "delete_component", params)
    }
}
