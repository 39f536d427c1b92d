use crate::code::{ComponentMetadata, extract_code};
use crate::error::Result;
use crate::library::NewComponent;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the save_component tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SaveComponentParams {
    /// Component source, or generation output containing a fenced block
    pub code: String,

    /// Display name (default: the component's function name)
    #[serde(default)]
    pub name: Option<String>,

    /// Label of the section the component was generated from
    #[serde(default)]
    pub section_label: Option<String>,

    /// Markup of the source section
    #[serde(default)]
    pub original_html: Option<String>,

    /// Style variant used for generation
    #[serde(default)]
    pub style_variant: Option<String>,
}

#[derive(Default)]
pub struct SaveComponentTool;

impl Tool for SaveComponentTool {
    type Params = SaveComponentParams;

    fn name(&self) -> &str {
        "save_component"
    }

    fn description(&self) -> &str {
        "Save a component to the library; newest components are listed first"
    }

    fn execute_typed(
        &self,
        params: SaveComponentParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let code = extract_code(&params.code);
        let name = params
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| ComponentMetadata::parse(&code).name);

        let saved = context.library.save(NewComponent {
            name,
            code,
            section_label: params.section_label,
            original_html: params.original_html,
            style_variant: params.style_variant,
        })?;

        Ok(ToolResult::success_with(saved))
    }
}

/// Parameters for the search_components tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchComponentsParams {
    /// Case-insensitive text matched against name, section label and code; empty lists all
    #[serde(default)]
    pub query: String,
}

#[derive(Default)]
pub struct SearchComponentsTool;

impl Tool for SearchComponentsTool {
    type Params = SearchComponentsParams;

    fn name(&self) -> &str {
        "search_components"
    }

    fn description(&self) -> &str {
        "Search saved components by name, section label or code"
    }

    fn execute_typed(
        &self,
        params: SearchComponentsParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let found = context.library.search(&params.query);
        Ok(ToolResult::success_with(serde_json::json!({
            "count": found.len(),
            "components": found,
        })))
    }
}

/// Parameters for the delete_component tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteComponentParams {
    /// Id of the saved component
    pub id: String,
}

#[derive(Default)]
pub struct DeleteComponentTool;

impl Tool for DeleteComponentTool {
    type Params = DeleteComponentParams;

    fn name(&self) -> &str {
        "delete_component"
    }

    fn description(&self) -> &str {
        "Delete a saved component by id"
    }

    fn execute_typed(
        &self,
        params: DeleteComponentParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        if context.library.delete(&params.id)? {
            Ok(ToolResult::success_with(serde_json::json!({ "deleted": params.id })))
        } else {
            Ok(ToolResult::failure(format!("No saved component with id {}", params.id)))
        }
    }
}
