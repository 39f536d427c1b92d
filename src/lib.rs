//! # sitelift
//!
//! Split arbitrary web pages into independently convertible sections, pull
//! component code out of generation output, and preview that code in an
//! isolated Chrome surface.
//!
//! ## Features
//!
//! - **Segmentation**: semantic containers first, heading blocks second, the
//!   whole body as a last resort; capped at 20 sections and de-duplicated
//! - **Code extraction**: first fenced block of free text, or the trimmed text
//! - **Live preview**: ordered text passes, a capability boundary for untrusted
//!   code and a readiness handshake modelled as timer-free state machines
//! - **MCP server**: every operation exposed as a tool for AI clients
//!
//! ## MCP Server
//!
//! ```bash
//! # stdio transport, headless browser launched on first use
//! cargo run --bin mcp-server
//!
//! # visible browser, components stored in a custom file
//! cargo run --bin mcp-server -- --headed --library ./components.json
//! ```
//!
//! ## Library Usage
//!
//! ### Segmenting a document
//!
//! ```rust
//! use sitelift::dom::segment;
//!
//! let html = format!(
//!     "<body><footer><p>{}</p></footer></body>",
//!     "Copyright and contact details. ".repeat(5)
//! );
//! let sections = segment(&html);
//! assert_eq!(sections[0].label, "Footer");
//! ```
//!
//! ### Extracting code
//!
//! ```rust
//! use sitelift::extract_code;
//!
//! let raw = "Sure!\n```tsx\nexport default function Hero() { return null; }\n```";
//! assert_eq!(extract_code(raw), "export default function Hero() { return null; }");
//! ```
//!
//! ### Previewing in Chrome
//!
//! ```rust,no_run
//! use sitelift::{BrowserSession, LaunchOptions, Viewport};
//! use sitelift::preview::PreviewConfig;
//!
//! # fn main() -> sitelift::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let report = session.render_preview(
//!     "export default function Foo() { return <div>Hi</div>; }",
//!     Viewport::Mobile,
//!     PreviewConfig::default(),
//! )?;
//! println!("rendered: {}, error: {:?}", report.rendered(), report.error);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: segmentation and page metadata
//! - [`code`]: code extraction, component metadata and sandbox export
//! - [`preview`]: transform passes, runtime boundary, surface/host protocol
//! - [`browser`]: Chrome session, page acquisition and the preview runtime
//! - [`library`]: saved components
//! - [`tools`]: named operations with JSON parameters
//! - [`mcp`]: Model Context Protocol server (requires `mcp-handler` feature)
//! - [`error`]: error types and result alias

pub mod browser;
pub mod code;
pub mod dom;
pub mod error;
pub mod library;
pub mod preview;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{
    BrowserSession, ChromeRuntime, ConnectionOptions, LaunchOptions, PreviewReport, Viewport,
};
pub use code::{ComponentMetadata, SandboxProject, extract_code};
pub use dom::{ScrapedPage, Section, SectionRequest, Segmenter, SegmenterConfig, segment};
pub use error::{LiftError, PreviewError, Result};
pub use library::{ComponentLibrary, NewComponent, SavedComponent};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};

#[cfg(feature = "mcp-handler")]
pub use mcp::SiteliftServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
