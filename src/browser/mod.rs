//! Chrome integration: page acquisition and the isolated preview surface.

pub mod config;
pub mod document;
pub mod runtime;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions, MOBILE_WIDTH, Viewport};
pub use runtime::ChromeRuntime;
pub use session::{BrowserSession, PreviewReport};
