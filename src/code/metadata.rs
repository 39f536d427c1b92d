use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Name used when no function declaration is found
pub const DEFAULT_COMPONENT_NAME: &str = "Component";

/// Component name and destructured prop names of generated code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ComponentMetadata {
    pub name: String,
    #[serde(default)]
    pub props: Vec<String>,
}

struct Patterns {
    function_name: Regex,
    function_props: Regex,
    arrow_props: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        function_name: Regex::new(r"function\s+(\w+)\s*\(").expect("function name regex"),
        function_props: Regex::new(r"function\s+\w+\s*\(\s*\{\s*([^}]*)\s*\}\s*\)")
            .expect("function props regex"),
        arrow_props: Regex::new(r"const\s+\w+\s*=\s*\(\s*\{\s*([^}]*)\s*\}\s*\)\s*=>")
            .expect("arrow props regex"),
    })
}

/// Name of the first `function Name(` declaration in `code`
pub fn component_name(code: &str) -> Option<&str> {
    patterns()
        .function_name
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

impl ComponentMetadata {
    /// Parse name and props from component source
    pub fn parse(code: &str) -> Self {
        let name = component_name(code).unwrap_or(DEFAULT_COMPONENT_NAME).to_string();

        let mut props = patterns()
            .function_props
            .captures(code)
            .and_then(|caps| caps.get(1))
            .map(|m| split_props(m.as_str()))
            .unwrap_or_default();

        if props.is_empty() {
            props = patterns()
                .arrow_props
                .captures(code)
                .and_then(|caps| caps.get(1))
                .map(|m| split_props(m.as_str()))
                .unwrap_or_default();
        }

        Self { name, props }
    }
}

fn split_props(list: &str) -> Vec<String> {
    list.split(',')
        .filter_map(|p| p.trim().split(':').next())
        .map(|p| p.trim())
        .filter(|p| !p.is_empty() && !p.starts_with("//"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_component() {
        let code = "export default function PricingTable({ plans, highlight: boolean }) {\n  \
                    return null;\n}";
        let meta = ComponentMetadata::parse(code);
        assert_eq!(meta.name, "PricingTable");
        assert_eq!(meta.props, vec!["plans", "highlight"]);
    }

    #[test]
    fn test_arrow_component_props() {
        let code = "const Card = ({ title, body }) => <div>{title}</div>;\nfunction helper() {}";
        let meta = ComponentMetadata::parse(code);
        assert_eq!(meta.name, "helper");
        assert_eq!(meta.props, vec!["title", "body"]);
    }

    #[test]
    fn test_defaults() {
        let meta = ComponentMetadata::parse("const x = 1;");
        assert_eq!(meta.name, DEFAULT_COMPONENT_NAME);
        assert!(meta.props.is_empty());
        assert_eq!(component_name("const x = 1;"), None);
    }
}
