use crate::dom::{Segmenter, SegmenterConfig};
use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the detect_sections tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetectSectionsParams {
    /// Complete HTML document
    pub html: String,

    /// Most sections to return (default and upper bound: 20)
    #[serde(default)]
    pub max_sections: Option<usize>,

    /// Shortest section markup kept, in characters (default: 100)
    #[serde(default)]
    pub min_html_len: Option<usize>,
}

impl DetectSectionsParams {
    fn config(&self) -> SegmenterConfig {
        let defaults = SegmenterConfig::default();
        SegmenterConfig {
            max_sections: self.max_sections.unwrap_or(defaults.max_sections),
            min_html_len: self.min_html_len.unwrap_or(defaults.min_html_len),
        }
    }
}

/// Split an HTML document into labeled sections
#[derive(Default)]
pub struct DetectSectionsTool;

impl Tool for DetectSectionsTool {
    type Params = DetectSectionsParams;

    fn name(&self) -> &str {
        "detect_sections"
    }

    fn description(&self) -> &str {
        "Split an HTML document into labeled, de-duplicated sections in document order"
    }

    fn execute_typed(
        &self,
        params: DetectSectionsParams,
        _context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let sections = Segmenter::new(params.config()).segment(&params.html);

        Ok(ToolResult::success_with(serde_json::json!({
            "count": sections.len(),
            "sections": sections,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::ComponentLibrary;
    use crate::tools::ToolRegistry;
    use serde_json::json;

    #[test]
    fn test_detect_sections_via_registry() {
        let library = ComponentLibrary::open("unused.json");
        let mut context = ToolContext::new(&library);
        let html = format!(
            "<body><footer><p>{}</p></footer></body>",
            "All rights reserved. ".repeat(8)
        );

        let result = ToolRegistry::with_defaults()
            .execute("detect_sections", json!({ "html": html }), &mut context)
            .unwrap();

        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["count"], 1);
        assert_eq!(data["sections"][0]["label"], "Footer");
        assert_eq!(data["sections"][0]["id"], "section-0-footer");
    }

    #[test]
    fn test_params_override_config() {
        let params: DetectSectionsParams =
            serde_json::from_value(json!({"html": "", "max_sections": 3})).unwrap();
        let config = params.config();
        assert_eq!(config.max_sections, 3);
        assert_eq!(config.min_html_len, 100);
    }

    #[test]
    fn test_max_sections_above_cap_is_clamped() {
        let library = ComponentLibrary::open("unused.json");
        let mut context = ToolContext::new(&library);
        let html: String = (0..40)
            .map(|i| format!("<section><h2>Block {}</h2><p>{}</p></section>", i, "x".repeat(120)))
            .collect();

        let result = ToolRegistry::with_defaults()
            .execute(
                "detect_sections",
                json!({ "html": html, "max_sections": 1000 }),
                &mut context,
            )
            .unwrap();

        assert_eq!(result.data.unwrap()["count"], 20);
    }
}
