use crate::code::metadata::component_name;
use crate::error::PreviewError;
use crate::preview::runtime::{ComponentRuntime, RuntimeError, SlotValue};
use crate::preview::transform;

/// Result of one render attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// The runtime's libraries are not loaded yet; nothing was executed
    DependenciesMissing,
    /// The component is mounted
    Rendered,
    /// The code could not be rendered; the error is already shown
    Failed(PreviewError),
}

impl Attempt {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::DependenciesMissing)
    }
}

fn script_error(err: RuntimeError) -> PreviewError {
    PreviewError::Script(err.0)
}

/// Run the full transform pipeline for `source` against `runtime`.
///
/// Code-level failures are shown in the surface immediately and reported as
/// [`Attempt::Failed`]. Missing libraries are reported without touching the
/// surface so the caller can retry.
pub fn attempt_render<R: ComponentRuntime + ?Sized>(runtime: &mut R, source: &str) -> Attempt {
    if source.is_empty() {
        present(runtime, &PreviewError::NoCode);
        return Attempt::Failed(PreviewError::NoCode);
    }

    let dependencies = runtime.dependencies();
    if !dependencies.all_present() {
        log::debug!("render deferred, dependencies missing: {:?}", dependencies);
        return Attempt::DependenciesMissing;
    }

    match render(runtime, source) {
        Ok(()) => {
            log::info!("preview rendered");
            Attempt::Rendered
        }
        Err(err) => {
            log::warn!("preview failed: {}", err);
            present(runtime, &err);
            Attempt::Failed(err)
        }
    }
}

/// Show a definitive failure in the surface
pub fn present<R: ComponentRuntime + ?Sized>(runtime: &mut R, err: &PreviewError) {
    if let Err(e) = runtime.show_error(&err.to_string()) {
        log::warn!("could not display preview error: {}", e);
    }
}

fn render<R: ComponentRuntime + ?Sized>(runtime: &mut R, source: &str) -> Result<(), PreviewError> {
    runtime.reset_slot().map_err(script_error)?;

    let normalized = transform::normalize_source(source);
    let transpiled = runtime.transpile(&normalized).map_err(script_error)?;
    let script = transform::prepare_script(&transpiled);
    runtime.execute(&script).map_err(script_error)?;

    if runtime.slot().map_err(script_error)? == SlotValue::Empty {
        if let Some(name) = component_name(source) {
            log::debug!("no default export, falling back to function {}", name);
            if let Err(e) = runtime.bind_slot(name) {
                log::debug!("fallback binding failed: {}", e);
            }
        }
    }

    match runtime.slot().map_err(script_error)? {
        SlotValue::Callable => {}
        other => {
            log::debug!("component slot not callable: {:?}", other);
            return Err(PreviewError::MissingExport);
        }
    }

    runtime.mount().map_err(script_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::runtime::Dependencies;

    /// Records calls and plays back scripted results
    #[derive(Default)]
    struct ScriptedRuntime {
        deps: Dependencies,
        transpile_error: Option<String>,
        slot_after_execute: Option<SlotValue>,
        bind_makes_callable: bool,
        slot: Option<SlotValue>,
        calls: Vec<String>,
        shown: Vec<String>,
        mounted: bool,
    }

    impl ComponentRuntime for ScriptedRuntime {
        fn dependencies(&mut self) -> Dependencies {
            self.deps
        }

        fn transpile(&mut self, source: &str) -> Result<String, RuntimeError> {
            self.calls.push(format!("transpile:{}", source));
            match &self.transpile_error {
                Some(msg) => Err(RuntimeError::new(msg.clone())),
                None => Ok(source.to_string()),
            }
        }

        fn reset_slot(&mut self) -> Result<(), RuntimeError> {
            self.calls.push("reset".into());
            self.slot = None;
            Ok(())
        }

        fn execute(&mut self, script: &str) -> Result<(), RuntimeError> {
            self.calls.push(format!("execute:{}", script));
            self.slot = self.slot_after_execute.clone();
            Ok(())
        }

        fn bind_slot(&mut self, identifier: &str) -> Result<(), RuntimeError> {
            self.calls.push(format!("bind:{}", identifier));
            if self.bind_makes_callable {
                self.slot = Some(SlotValue::Callable);
            }
            Ok(())
        }

        fn slot(&mut self) -> Result<SlotValue, RuntimeError> {
            Ok(self.slot.clone().unwrap_or(SlotValue::Empty))
        }

        fn mount(&mut self) -> Result<(), RuntimeError> {
            self.mounted = true;
            Ok(())
        }

        fn show_error(&mut self, message: &str) -> Result<(), RuntimeError> {
            self.shown.push(message.to_string());
            Ok(())
        }
    }

    fn ready() -> ScriptedRuntime {
        ScriptedRuntime {
            deps: Dependencies::all(),
            ..Default::default()
        }
    }

    #[test]
    fn test_renders_default_export() {
        let mut runtime = ready();
        runtime.slot_after_execute = Some(SlotValue::Callable);

        let result = attempt_render(
            &mut runtime,
            "export default function Foo(){ return <div>Hi<br></div>; }",
        );

        assert_eq!(result, Attempt::Rendered);
        assert!(runtime.mounted);
        assert!(runtime.shown.is_empty());
        assert_eq!(runtime.calls[0], "reset");
        assert!(runtime.calls[1].contains("<br />"));
        assert!(runtime.calls[2].starts_with("execute:window.__previewComponent = function Foo()"));
    }

    #[test]
    fn test_missing_dependencies_touch_nothing() {
        let mut runtime = ScriptedRuntime::default();

        let result = attempt_render(&mut runtime, "export default function Foo(){}");

        assert_eq!(result, Attempt::DependenciesMissing);
        assert!(!result.is_settled());
        assert!(runtime.calls.is_empty());
        assert!(runtime.shown.is_empty());
    }

    #[test]
    fn test_empty_code() {
        let mut runtime = ScriptedRuntime::default();

        let result = attempt_render(&mut runtime, "");

        assert_eq!(result, Attempt::Failed(PreviewError::NoCode));
        assert_eq!(runtime.shown, vec!["No code received."]);
    }

    #[test]
    fn test_fallback_binds_named_function() {
        let mut runtime = ready();
        runtime.bind_makes_callable = true;

        let result =
            attempt_render(&mut runtime, "function Hero() { return <h1/>; }\nexport default Hero;");

        assert_eq!(result, Attempt::Rendered);
        assert!(runtime.calls.contains(&"bind:Hero".to_string()));
    }

    #[test]
    fn test_no_export() {
        let mut runtime = ready();

        let result = attempt_render(&mut runtime, "const x = 1;");

        assert_eq!(result, Attempt::Failed(PreviewError::MissingExport));
        assert!(!runtime.mounted);
        assert_eq!(runtime.shown, vec!["Generated code did not export a component."]);
    }

    #[test]
    fn test_non_callable_export() {
        let mut runtime = ready();
        runtime.slot_after_execute = Some(SlotValue::Other("object".into()));

        let result = attempt_render(&mut runtime, "export default { a: 1 };");

        assert_eq!(result, Attempt::Failed(PreviewError::MissingExport));
        assert!(!runtime.calls.iter().any(|c| c.starts_with("bind:")));
    }

    #[test]
    fn test_transpile_error_is_reported() {
        let mut runtime = ready();
        runtime.transpile_error = Some("Unterminated JSX contents (1:30)".into());

        let result = attempt_render(&mut runtime, "export default function A(){ return <div>; }");

        assert_eq!(
            result,
            Attempt::Failed(PreviewError::Script("Unterminated JSX contents (1:30)".into()))
        );
        assert_eq!(runtime.shown, vec!["Preview error: Unterminated JSX contents (1:30)"]);
        assert!(!runtime.mounted);
    }
}
