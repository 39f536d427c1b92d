use crate::browser::Viewport;
use crate::code::extract_code;
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the preview_component tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PreviewComponentParams {
    /// Component source, or generation output containing a fenced block
    pub code: String,

    /// Frame width: "desktop" or "mobile" (375px); defaults to the
    /// viewport the browser was launched with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// Render a component in an isolated browser tab and capture it
#[derive(Default)]
pub struct PreviewComponentTool;

impl Tool for PreviewComponentTool {
    type Params = PreviewComponentParams;

    fn name(&self) -> &str {
        "preview_component"
    }

    fn description(&self) -> &str {
        "Render a React component in an isolated browser tab \
         and return a screenshot plus any preview error"
    }

    fn needs_browser(&self) -> bool {
        true
    }

    fn execute_typed(
        &self,
        params: PreviewComponentParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let session = context.session(self.name())?;
        let code = extract_code(&params.code);
        let viewport = session.options().preview_viewport(params.viewport);
        let report = session.render_preview(&code, viewport, context.preview.clone())?;

        let result = ToolResult::success_with(serde_json::json!({
            "rendered": report.rendered(),
            "state": format!("{:?}", report.state),
            "error": report.error,
            "width": report.width,
        }));
        Ok(result.with_png(&report.screenshot))
    }
}
