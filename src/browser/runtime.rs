use crate::browser::document;
use crate::error::{LiftError, Result};
use crate::preview::{ComponentRuntime, Dependencies, RuntimeError, SlotValue};
use headless_chrome::Tab;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Reply envelope produced by every `window.__sitelift` bridge call
#[derive(Debug, Deserialize)]
struct BridgeReply {
    ok: bool,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SlotReply {
    kind: String,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
}

/// [`ComponentRuntime`] backed by a dedicated Chrome tab.
///
/// Untrusted code runs only inside the tab's page, reached through the bridge
/// installed by the surface document.
pub struct ChromeRuntime {
    tab: Arc<Tab>,
    width: u32,
}

impl ChromeRuntime {
    /// Load the surface document into `tab`
    pub fn open(tab: Arc<Tab>, width: u32, timeout: Duration) -> Result<Self> {
        tab.set_default_timeout(timeout);
        let runtime = Self { tab, width };
        runtime.reload()?;
        Ok(runtime)
    }

    /// Reload the surface document, discarding any rendered state
    pub fn reload(&self) -> Result<()> {
        log::debug!("loading preview surface ({}px)", self.width);
        self.tab
            .navigate_to(&document::surface_data_url(self.width))
            .map_err(|e| {
                LiftError::NavigationFailed(format!("Failed to load preview surface: {}", e))
            })?
            .wait_until_navigated()
            .map_err(|e| {
                LiftError::NavigationFailed(format!("Preview surface did not load: {}", e))
            })?;
        Ok(())
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Capture the surface as PNG bytes
    pub fn screenshot(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| {
                LiftError::TabOperationFailed(format!("Failed to capture screenshot: {}", e))
            })
    }

    /// Text of the inline error alert, if one is shown
    pub fn error_text(&self) -> Result<Option<String>> {
        let js = "(function(){var e=document.getElementById('preview-error');\
                  return e && e.style.display==='block' ? e.textContent : null;})()";
        let result = self
            .tab
            .evaluate(js, false)
            .map_err(|e| LiftError::EvaluationFailed(e.to_string()))?;
        Ok(result.value.and_then(|v| v.as_str().map(str::to_string)))
    }

    fn call(&self, method: &str, arg: Option<&str>) -> std::result::Result<Value, RuntimeError> {
        let arg = match arg {
            Some(a) => serde_json::to_string(a).map_err(|e| RuntimeError::new(e.to_string()))?,
            None => String::new(),
        };
        let js = format!(
            "window.__sitelift ? window.__sitelift.{}({}) \
             : JSON.stringify({{ok:false,error:'preview bridge missing'}})",
            method, arg
        );

        let result = self
            .tab
            .evaluate(&js, false)
            .map_err(|e| RuntimeError::new(format!("{} failed: {}", method, e)))?;
        let raw = result
            .value
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| RuntimeError::new(format!("{} returned nothing", method)))?;

        let reply: BridgeReply =
            serde_json::from_str(&raw).map_err(|e| RuntimeError::new(e.to_string()))?;
        if reply.ok {
            Ok(reply.value)
        } else {
            Err(RuntimeError::new(reply.error.unwrap_or_else(|| "Preview error".to_string())))
        }
    }
}

impl ComponentRuntime for ChromeRuntime {
    fn dependencies(&mut self) -> Dependencies {
        match self.call("deps", None) {
            Ok(value) => serde_json::from_value::<DependencyReply>(value)
                .map(Dependencies::from)
                .unwrap_or_default(),
            Err(e) => {
                log::debug!("dependency check failed: {}", e);
                Dependencies::default()
            }
        }
    }

    fn transpile(&mut self, source: &str) -> std::result::Result<String, RuntimeError> {
        let value = self.call("transpile", Some(source))?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| RuntimeError::new("transpiler returned no code"))
    }

    fn reset_slot(&mut self) -> std::result::Result<(), RuntimeError> {
        self.call("reset", None).map(|_| ())
    }

    fn execute(&mut self, script: &str) -> std::result::Result<(), RuntimeError> {
        self.call("exec", Some(script)).map(|_| ())
    }

    fn bind_slot(&mut self, identifier: &str) -> std::result::Result<(), RuntimeError> {
        self.call("bind", Some(identifier)).map(|_| ())
    }

    fn slot(&mut self) -> std::result::Result<SlotValue, RuntimeError> {
        let value = self.call("slot", None)?;
        let reply: SlotReply =
            serde_json::from_value(value).map_err(|e| RuntimeError::new(e.to_string()))?;
        Ok(match reply.kind.as_str() {
            "empty" => SlotValue::Empty,
            "callable" => SlotValue::Callable,
            _ => SlotValue::Other(reply.type_name.unwrap_or_default()),
        })
    }

    fn mount(&mut self) -> std::result::Result<(), RuntimeError> {
        self.call("mount", None).map(|_| ())
    }

    fn show_error(&mut self, message: &str) -> std::result::Result<(), RuntimeError> {
        self.call("showError", Some(message)).map(|_| ())
    }
}

#[derive(Debug, Default, Deserialize)]
struct DependencyReply {
    mount_point: bool,
    renderer: bool,
    transpiler: bool,
}

impl From<DependencyReply> for Dependencies {
    fn from(reply: DependencyReply) -> Self {
        Self {
            mount_point: reply.mount_point,
            renderer: reply.renderer,
            transpiler: reply.transpiler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_reply_parsing() {
        let ok: BridgeReply = serde_json::from_str(r#"{"ok":true,"value":"var a = 1;"}"#).unwrap();
        assert!(ok.ok);
        assert_eq!(ok.value, Value::String("var a = 1;".into()));

        let err: BridgeReply =
            serde_json::from_str(r#"{"ok":false,"error":"Unexpected token (1:5)"}"#).unwrap();
        assert!(!err.ok);
        assert_eq!(err.error.as_deref(), Some("Unexpected token (1:5)"));
        assert_eq!(err.value, Value::Null);
    }

    #[test]
    fn test_slot_reply_parsing() {
        let other: SlotReply = serde_json::from_str(r#"{"kind":"other","type":"object"}"#).unwrap();
        assert_eq!(other.kind, "other");
        assert_eq!(other.type_name.as_deref(), Some("object"));
    }

    #[test]
    fn test_dependency_reply() {
        let reply: DependencyReply = serde_json::from_str(
            r#"{"mount_point":true,"renderer":true,"transpiler":false}"#,
        )
        .unwrap();
        let deps = Dependencies::from(reply);
        assert!(deps.mount_point && deps.renderer);
        assert!(!deps.all_present());
    }
}
