//! Untrusted component execution boundary.
//!
//! Generated UI code has to run for a preview to exist. Everything that
//! transpiles, evaluates or mounts that code sits behind [`ComponentRuntime`],
//! so the pipeline and protocol never touch a script engine directly. The
//! Chrome implementation lives in `crate::browser::ChromeRuntime` and runs the
//! code in its own tab.

use thiserror::Error;

/// Failure reported by a runtime while handling untrusted code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RuntimeError(pub String);

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Which of the surface's runtime dependencies are present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// DOM node the component is rendered into
    pub mount_point: bool,
    /// Rendering library with a mount/render primitive
    pub renderer: bool,
    /// Source-to-executable transpiler
    pub transpiler: bool,
}

impl Dependencies {
    pub fn all() -> Self {
        Self {
            mount_point: true,
            renderer: true,
            transpiler: true,
        }
    }

    pub fn all_present(&self) -> bool {
        self.mount_point && self.renderer && self.transpiler
    }
}

/// What the component slot currently holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SlotValue {
    #[default]
    Empty,
    Callable,
    /// Populated with something that cannot be rendered (type name)
    Other(String),
}

/// Capability for transpiling, executing and mounting untrusted component code
pub trait ComponentRuntime {
    /// Check which dependencies have finished loading
    fn dependencies(&mut self) -> Dependencies;

    /// Transpile component-markup source into executable script
    fn transpile(&mut self, source: &str) -> Result<String, RuntimeError>;

    /// Clear the component slot
    fn reset_slot(&mut self) -> Result<(), RuntimeError>;

    /// Evaluate a script in the surface's global scope
    fn execute(&mut self, script: &str) -> Result<(), RuntimeError>;

    /// Assign the global binding `identifier` into the component slot
    fn bind_slot(&mut self, identifier: &str) -> Result<(), RuntimeError>;

    /// Inspect the component slot
    fn slot(&mut self) -> Result<SlotValue, RuntimeError>;

    /// Clear errors, create a fresh container and render the slot into it
    fn mount(&mut self) -> Result<(), RuntimeError>;

    /// Show an inline alert and hide rendered output
    fn show_error(&mut self, message: &str) -> Result<(), RuntimeError>;
}

impl<R: ComponentRuntime + ?Sized> ComponentRuntime for Box<R> {
    fn dependencies(&mut self) -> Dependencies {
        (**self).dependencies()
    }

    fn transpile(&mut self, source: &str) -> Result<String, RuntimeError> {
        (**self).transpile(source)
    }

    fn reset_slot(&mut self) -> Result<(), RuntimeError> {
        (**self).reset_slot()
    }

    fn execute(&mut self, script: &str) -> Result<(), RuntimeError> {
        (**self).execute(script)
    }

    fn bind_slot(&mut self, identifier: &str) -> Result<(), RuntimeError> {
        (**self).bind_slot(identifier)
    }

    fn slot(&mut self) -> Result<SlotValue, RuntimeError> {
        (**self).slot()
    }

    fn mount(&mut self) -> Result<(), RuntimeError> {
        (**self).mount()
    }

    fn show_error(&mut self, message: &str) -> Result<(), RuntimeError> {
        (**self).show_error(message)
    }
}
