use crate::code::{ComponentMetadata, extract_code};
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the extract_code tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractCodeParams {
    /// Raw text returned by a code generation step
    pub text: String,
}

/// Isolate the code from fenced generation output
#[derive(Default)]
pub struct ExtractCodeTool;

impl Tool for ExtractCodeTool {
    type Params = ExtractCodeParams;

    fn name(&self) -> &str {
        "extract_code"
    }

    fn description(&self) -> &str {
        "Extract the code from the first fenced block of generation output, \
         or return the trimmed text"
    }

    fn execute_typed(
        &self,
        params: ExtractCodeParams,
        _context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let code = extract_code(&params.text);
        Ok(ToolResult::success_with(serde_json::json!({ "code": code })))
    }
}

/// Parameters for the component_metadata tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComponentMetadataParams {
    /// Component source
    pub code: String,
}

/// Report a component's name and props
#[derive(Default)]
pub struct ComponentMetadataTool;

impl Tool for ComponentMetadataTool {
    type Params = ComponentMetadataParams;

    fn name(&self) -> &str {
        "component_metadata"
    }

    fn description(&self) -> &str {
        "Read the component name and destructured prop names from component source"
    }

    fn execute_typed(
        &self,
        params: ComponentMetadataParams,
        _context: &mut ToolContext,
    ) -> Result<ToolResult> {
        Ok(ToolResult::success_with(ComponentMetadata::parse(&params.code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::ComponentLibrary;

    #[test]
    fn test_extract_code_tool() {
        let library = ComponentLibrary::open("unused.json");
        let mut context = ToolContext::new(&library);
        let text = "Here you go:\n```tsx\nexport default function A() {}\n```\nEnjoy!";

        let result = ExtractCodeTool
            .execute_typed(ExtractCodeParams { text: text.to_string() }, &mut context)
            .unwrap();

        assert_eq!(result.data.unwrap()["code"], "export default function A() {}");
    }

    #[test]
    fn test_component_metadata_tool() {
        let library = ComponentLibrary::open("unused.json");
        let mut context = ToolContext::new(&library);
        let code = "export default function Card({ title, body }) { return null; }";

        let result = ComponentMetadataTool
            .execute_typed(ComponentMetadataParams { code: code.to_string() }, &mut context)
            .unwrap();

        let data = result.data.unwrap();
        assert_eq!(data["name"], "Card");
        assert_eq!(data["props"], serde_json::json!(["title", "body"]));
    }
}
