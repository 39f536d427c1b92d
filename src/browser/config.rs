use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Width of the mobile preview frame in CSS pixels
pub const MOBILE_WIDTH: u32 = 375;

/// Preview frame width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// Full browser window width
    #[default]
    Desktop,
    /// Fixed phone width
    Mobile,
}

impl Viewport {
    /// Frame width given the browser window width
    pub fn width(self, window_width: u32) -> u32 {
        match self {
            Self::Desktop => window_width,
            Self::Mobile => MOBILE_WIDTH,
        }
    }
}

/// Options for launching a new browser instance
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run browser in headless mode (default: true)
    pub headless: bool,

    /// Custom Chrome/Chromium binary path
    pub chrome_path: Option<PathBuf>,

    /// Browser window width (default: 1280)
    pub window_width: u32,

    /// Browser window height (default: 800)
    pub window_height: u32,

    /// User data directory for persistent profile
    pub user_data_dir: Option<PathBuf>,

    /// Enable Chrome sandbox (default: true)
    pub sandbox: bool,

    /// Viewport used for preview surfaces
    pub viewport: Viewport,

    /// Navigation timeout in milliseconds (default: 30000)
    pub timeout: u64,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            window_width: 1280,
            window_height: 800,
            user_data_dir: None,
            sandbox: true,
            viewport: Viewport::Desktop,
            timeout: 30_000,
        }
    }
}

impl LaunchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set Chrome binary path
    pub fn chrome_path(mut self, path: PathBuf) -> Self {
        self.chrome_path = Some(path);
        self
    }

    /// Builder method: set user data directory
    pub fn user_data_dir(mut self, dir: PathBuf) -> Self {
        self.user_data_dir = Some(dir);
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Builder method: set preview viewport
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Builder method: set navigation timeout in milliseconds
    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = timeout_ms;
        self
    }

    /// Width of the preview frame for the configured viewport
    pub fn frame_width(&self) -> u32 {
        self.viewport.width(self.window_width)
    }

    /// Viewport for one preview: the requested one, else the configured default
    pub fn preview_viewport(&self, requested: Option<Viewport>) -> Viewport {
        requested.unwrap_or(self.viewport)
    }
}

/// Options for connecting to an existing browser instance
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// WebSocket URL for Chrome DevTools Protocol
    pub ws_url: String,

    /// Connection timeout in milliseconds (default: 30000)
    pub timeout: u64,
}

impl ConnectionOptions {
    pub fn new<S: Into<String>>(ws_url: S) -> Self {
        Self {
            ws_url: ws_url.into(),
            timeout: 30_000,
        }
    }

    /// Builder method: set connection timeout
    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout = timeout_ms;
        self
    }
}
