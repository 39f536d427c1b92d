use crate::code::metadata::{DEFAULT_COMPONENT_NAME, component_name};
use crate::error::Result;
use indexmap::IndexMap;
use serde_json::json;
use std::path::{Path, PathBuf};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body>
  <div id="root"></div>
  <script type="module" src="/src/main.jsx"></script>
</body>
</html>"#;

/// A minimal runnable React project wrapping one generated component
#[derive(Debug, Clone, PartialEq)]
pub struct SandboxProject {
    pub component_name: String,

    /// Relative path to file contents, in write order
    pub files: IndexMap<String, String>,
}

impl SandboxProject {
    /// Build the project files for `code`
    pub fn from_code(code: &str) -> Self {
        let component_name = component_name(code).unwrap_or(DEFAULT_COMPONENT_NAME).to_string();

        let package_json = json!({
            "name": "generated-component",
            "version": "0.0.1",
            "private": true,
            "dependencies": {
                "react": "^18.2.0",
                "react-dom": "^18.2.0"
            }
        });

        let main_jsx = format!(
            "import React from 'react';\n\
             import ReactDOM from 'react-dom/client';\n\
             import Component from './{name}.tsx';\n\
             \n\
             ReactDOM.createRoot(document.getElementById('root')).render(\n  \
             <React.StrictMode>\n    \
             <Component />\n  \
             </React.StrictMode>\n\
             );",
            name = component_name
        );

        let mut files = IndexMap::new();
        files.insert(
            "package.json".to_string(),
            serde_json::to_string_pretty(&package_json).unwrap_or_default(),
        );
        files.insert("index.html".to_string(), INDEX_HTML.to_string());
        files.insert("src/main.jsx".to_string(), main_jsx);
        files.insert(format!("src/{}.tsx", component_name), code.to_string());

        Self {
            component_name,
            files,
        }
    }

    /// Write every file below `dir`, creating directories as needed
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.files.len());
        for (relative, content) in &self.files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, content)?;
            log::debug!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
