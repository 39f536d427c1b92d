//! sitelift MCP Server
//!
//! Exposes page segmentation, code extraction, live preview and the saved
//! component library as Model Context Protocol tools.

use clap::{Parser, ValueEnum};
use rmcp::{ServiceExt, transport::stdio};
use sitelift::browser::{ConnectionOptions, LaunchOptions, Viewport};
use sitelift::library::{ComponentLibrary, DEFAULT_LIBRARY_FILE};
use sitelift::{BrowserSession, SiteliftServer};
use std::path::PathBuf;

use rmcp::transport::{
    sse_server::{SseServer, SseServerConfig},
    streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "sitelift-mcp")]
#[command(version)]
#[command(about = "Website-to-component MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,

    /// WebSocket endpoint URL of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Render previews at phone width (375px)
    #[arg(long)]
    mobile: bool,

    /// Saved component library file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LIBRARY_FILE)]
    library: PathBuf,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    fn launch_options(&self) -> LaunchOptions {
        let mut options = LaunchOptions::new()
            .headless(!self.headed)
            .viewport(if self.mobile { Viewport::Mobile } else { Viewport::Desktop });
        if let Some(path) = &self.executable_path {
            options = options.chrome_path(path.clone());
        }
        if let Some(dir) = &self.user_data_dir {
            options = options.user_data_dir(dir.clone());
        }
        options
    }
}

/// Build a server; an explicit endpoint is attached eagerly, otherwise the
/// browser launches on first use
fn build_server(
    ws_endpoint: Option<&str>,
    options: &LaunchOptions,
    library: &ComponentLibrary,
) -> sitelift::Result<SiteliftServer> {
    match ws_endpoint {
        Some(url) => {
            let session = BrowserSession::connect(ConnectionOptions::new(url))?;
            Ok(SiteliftServer::with_session(session, library.clone()))
        }
        None => Ok(SiteliftServer::with_options(options.clone(), library.clone())),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.launch_options();
    let library = ComponentLibrary::open(cli.library.clone());
    let ws_endpoint = cli.ws_endpoint.clone();

    eprintln!("sitelift MCP Server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Browser mode: {}", if options.headless { "headless" } else { "headed" });
    eprintln!("Preview viewport: {:?} ({}px)", options.viewport, options.frame_width());
    eprintln!("Component library: {}", library.path().display());

    if let Some(ref path) = cli.executable_path {
        eprintln!("Browser executable: {}", path.display());
    }

    if let Some(ref endpoint) = ws_endpoint {
        eprintln!("WebSocket endpoint: {}", endpoint);
    }

    if let Some(ref dir) = cli.user_data_dir {
        eprintln!("User data directory: {}", dir.display());
    }

    match cli.transport {
        Transport::Stdio => {
            eprintln!("Transport: stdio");
            eprintln!("Ready to accept MCP connections via stdio");
            let service = build_server(ws_endpoint.as_deref(), &options, &library)
                .map_err(|e| format!("Failed to create sitelift server: {}", e))?;
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            eprintln!("Server quit with reason: {:?}", quit_reason);
            // Give the browser a moment to shut down
            tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
            eprintln!("Cleanup complete, exiting...");
        }
        Transport::Sse => {
            eprintln!("Transport: SSE");
            eprintln!("Port: {}", cli.port);
            eprintln!("SSE path: {}", cli.sse_path);
            eprintln!("SSE POST path: {}", cli.sse_post_path);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            let (sse_server, router) = SseServer::new(config);

            eprintln!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.sse_path);

            // one server per connection, all sharing the library file
            let server = build_server(ws_endpoint.as_deref(), &options, &library)
                .map_err(|e| format!("Failed to create sitelift server: {}", e))?;
            let _cancellation_token = sse_server.with_service(move || server.clone());

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            eprintln!("Transport: HTTP streamable");
            eprintln!("Port: {}", cli.port);
            eprintln!("HTTP path: {}", cli.http_path);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let server = build_server(ws_endpoint.as_deref(), &options, &library)
                .map_err(|e| format!("Failed to create sitelift server: {}", e))?;
            let service_factory = move || Ok::<_, std::io::Error>(server.clone());

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            eprintln!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.http_path);

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
