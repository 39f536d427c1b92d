use crate::code::{SandboxProject, extract_code};
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters for the export_sandbox tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportSandboxParams {
    /// Component source, or generation output containing a fenced block
    pub code: String,

    /// Directory to write the project into; files are only returned when omitted
    #[serde(default)]
    pub dir: Option<String>,
}

/// Package a component as a runnable sandbox project
#[derive(Default)]
pub struct ExportSandboxTool;

impl Tool for ExportSandboxTool {
    type Params = ExportSandboxParams;

    fn name(&self) -> &str {
        "export_sandbox"
    }

    fn description(&self) -> &str {
        "Package a component as a runnable React project \
         (package.json, index.html, entry point and component file)"
    }

    fn execute_typed(
        &self,
        params: ExportSandboxParams,
        _context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let project = SandboxProject::from_code(&extract_code(&params.code));

        let written = match params.dir {
            Some(dir) => project
                .write_to(&PathBuf::from(dir))?
                .into_iter()
                .map(|p| p.display().to_string())
                .collect(),
            None => Vec::new(),
        };

        Ok(ToolResult::success_with(serde_json::json!({
            "component_name": project.component_name,
            "files": project.files,
            "written": written,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::ComponentLibrary;
    use tempfile::TempDir;

    #[test]
    fn test_export_without_dir_only_returns_files() {
        let library = ComponentLibrary::open("unused.json");
        let mut context = ToolContext::new(&library);

        let result = ExportSandboxTool
            .execute_typed(
                ExportSandboxParams {
                    code: "```jsx\nexport default function Nav() { return <nav/>; }\n```".into(),
                    dir: None,
                },
                &mut context,
            )
            .unwrap();

        let data = result.data.unwrap();
        assert_eq!(data["component_name"], "Nav");
        assert_eq!(
            data["files"]["src/Nav.tsx"],
            "export default function Nav() { return <nav/>; }"
        );
        assert_eq!(data["written"], serde_json::json!([]));
    }

    #[test]
    fn test_export_writes_project() {
        let dir = TempDir::new().unwrap();
        let library = ComponentLibrary::open("unused.json");
        let mut context = ToolContext::new(&library);

        let result = ExportSandboxTool
            .execute_typed(
                ExportSandboxParams {
                    code: "export default function Hero() { return null; }".into(),
                    dir: Some(dir.path().display().to_string()),
                },
                &mut context,
            )
            .unwrap();

        assert_eq!(result.data.unwrap()["written"].as_array().unwrap().len(), 4);
        assert!(dir.path().join("src/Hero.tsx").exists());
        assert!(dir.path().join("package.json").exists());
    }
}
