use crate::browser::config::{ConnectionOptions, LaunchOptions, Viewport};
use crate::browser::runtime::ChromeRuntime;
use crate::dom::ScrapedPage;
use crate::dom::page::MAX_HTML_LENGTH;
use crate::error::{LiftError, Result};
use crate::preview::{PreviewConfig, PreviewLink, SurfaceId, SurfaceState, SystemClock};
use crate::tools::utils::validate_url;
use headless_chrome::{Browser, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use url::Url;

/// Outcome of rendering one component in a preview tab
#[derive(Debug, Clone)]
pub struct PreviewReport {
    pub state: SurfaceState,

    /// Alert text shown in the surface, if rendering failed
    pub error: Option<String>,

    /// PNG capture of the surface after it settled
    pub screenshot: Vec<u8>,

    /// Frame width the component was rendered at
    pub width: u32,
}

impl PreviewReport {
    pub fn rendered(&self) -> bool {
        self.state == SurfaceState::Rendered
    }
}

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    browser: Browser,

    /// Tab used for page acquisition
    tab: Arc<Tab>,

    options: LaunchOptions,

    next_surface: AtomicU64,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Sites that sniff automation serve different markup
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Keep the browser alive between MCP calls
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.path = options.chrome_path.clone();
        launch_opts.user_data_dir = options.user_data_dir.clone();
        launch_opts.sandbox = options.sandbox;

        log::info!("launching browser (headless: {})", options.headless);
        let browser =
            Browser::new(launch_opts).map_err(|e| LiftError::LaunchFailed(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| LiftError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self::from_parts(browser, tab, options))
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        log::info!("connecting to browser at {}", options.ws_url);
        let timeout = Duration::from_millis(options.timeout);
        let browser = Browser::connect_with_timeout(options.ws_url, timeout)
            .map_err(|e| LiftError::ConnectionFailed(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| LiftError::ConnectionFailed(format!("Failed to create tab: {}", e)))?;

        let launch = LaunchOptions::default().timeout(options.timeout);
        Ok(Self::from_parts(browser, tab, launch))
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    fn from_parts(browser: Browser, tab: Arc<Tab>, options: LaunchOptions) -> Self {
        tab.set_default_timeout(Duration::from_millis(options.timeout));
        Self {
            browser,
            tab,
            options,
            next_surface: AtomicU64::new(1),
        }
    }

    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn options(&self) -> &LaunchOptions {
        &self.options
    }

    /// Create a new tab
    pub fn new_tab(&self) -> Result<Arc<Tab>> {
        let tab = self
            .browser
            .new_tab()
            .map_err(|e| LiftError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;
        Ok(tab)
    }

    /// Navigate the acquisition tab and wait for the load to finish
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| {
                LiftError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e))
            })?
            .wait_until_navigated()
            .map_err(|e| LiftError::NavigationFailed(format!("Navigation timeout: {}", e)))?;
        Ok(())
    }

    /// Load a public page and capture its rendered HTML, stylesheets and images
    pub fn fetch_page(&self, url: &str) -> Result<ScrapedPage> {
        let requested = validate_url(url)?;
        self.navigate(requested.as_str())?;

        let html = self
            .tab
            .get_content()
            .map_err(|e| {
                LiftError::EvaluationFailed(format!("Failed to read page content: {}", e))
            })?;

        let length = html.chars().count();
        if length > MAX_HTML_LENGTH {
            return Err(LiftError::PageTooLarge {
                size_kb: (length as f64 / 1000.0).round() as usize,
            });
        }

        // redirects change the base for relative asset URLs
        let base = Url::parse(&self.tab.get_url()).unwrap_or(requested);
        log::info!("fetched {} ({} chars)", base, length);

        Ok(ScrapedPage::from_html(&base, html))
    }

    /// Open a fresh preview surface in its own tab
    pub fn open_preview(&self, viewport: Viewport) -> Result<ChromeRuntime> {
        let tab = self.new_tab()?;
        let width = viewport.width(self.options.window_width);
        ChromeRuntime::open(tab, width, Duration::from_millis(self.options.timeout))
    }

    /// Render `code` in a new preview tab, wait for it to settle and capture it.
    /// The tab is closed afterwards.
    pub fn render_preview(
        &self,
        code: &str,
        viewport: Viewport,
        config: PreviewConfig,
    ) -> Result<PreviewReport> {
        let runtime = self.open_preview(viewport)?;
        let id = SurfaceId(self.next_surface.fetch_add(1, Ordering::Relaxed));

        let mut link = PreviewLink::new(id, runtime, config, SystemClock);
        link.send_code(code);
        link.load();
        let state = link.settle();
        log::info!("preview {:?} settled as {:?}", id, state);

        let runtime = link.into_surface().into_runtime();
        let error = runtime.error_text()?;
        let screenshot = runtime.screenshot()?;
        let width = runtime.width();

        if let Err(e) = runtime.tab().close(false) {
            log::warn!("failed to close preview tab: {}", e);
        }

        Ok(PreviewReport {
            state,
            error,
            screenshot,
            width,
        })
    }

    /// Close every tab; the process exits when the session drops
    pub fn close(&self) -> Result<()> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| LiftError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();
        for tab in tabs {
            if let Err(e) = tab.close(false) {
                log::debug!("failed to close tab: {}", e);
            }
        }
        Ok(())
    }
}
