//! Generated-code handling
//!
//! - extract: Isolate source code from raw model output
//! - metadata: Component name and prop discovery
//! - export: Standalone project files for a generated component

pub mod export;
pub mod extract;
pub mod metadata;

pub use export::SandboxProject;
pub use extract::extract_code;
pub use metadata::{ComponentMetadata, component_name};
