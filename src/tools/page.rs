use crate::dom::{Section, Segmenter};
use crate::error::Result;
use crate::tools::utils::normalize_url;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the fetch_page tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FetchPageParams {
    /// Public http(s) URL of the page to load
    pub url: String,

    /// Include the full page HTML in the result (default: false)
    #[serde(default)]
    pub include_html: bool,
}

#[derive(Debug, Serialize)]
struct FetchPageOutput {
    url: String,
    title: String,
    styles: Vec<String>,
    images: Vec<String>,
    html_length: usize,
    sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

/// Load a page in the browser and split it into sections
#[derive(Default)]
pub struct FetchPageTool;

impl Tool for FetchPageTool {
    type Params = FetchPageParams;

    fn name(&self) -> &str {
        "fetch_page"
    }

    fn description(&self) -> &str {
        "Load a public web page, capture its HTML, stylesheets and images, \
         and split it into convertible sections"
    }

    fn needs_browser(&self) -> bool {
        true
    }

    fn execute_typed(
        &self,
        params: FetchPageParams,
        context: &mut ToolContext,
    ) -> Result<ToolResult> {
        let session = context.session(self.name())?;
        let url = normalize_url(&params.url);
        let page = session.fetch_page(&url)?;
        let sections = Segmenter::default().segment(&page.html);

        Ok(ToolResult::success_with(FetchPageOutput {
            url,
            title: page.title,
            styles: page.styles,
            images: page.images,
            html_length: page.html.chars().count(),
            sections,
            html: params.include_html.then_some(page.html),
        }))
    }
}
