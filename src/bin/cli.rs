//! sitelift command line
//!
//! Every command prints JSON to stdout; status lines go to stderr.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sitelift::browser::{BrowserSession, LaunchOptions, PreviewReport, Viewport};
use sitelift::code::{ComponentMetadata, SandboxProject, extract_code};
use sitelift::dom::{MAX_SECTIONS, Segmenter, SegmenterConfig};
use sitelift::library::{ComponentLibrary, DEFAULT_LIBRARY_FILE, NewComponent};
use sitelift::preview::PreviewConfig;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sitelift")]
#[command(version)]
#[command(
    about = "Split web pages into sections and preview generated components",
    long_about = None
)]
struct Cli {
    /// Saved component library file
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_LIBRARY_FILE)]
    library: PathBuf,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H', global = true)]
    headed: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split an HTML document into sections
    Sections {
        /// HTML file, or `-` for stdin
        #[arg(value_name = "FILE", required_unless_present = "url")]
        input: Option<PathBuf>,

        /// Load this page in the browser instead of reading a file
        #[arg(long, conflicts_with = "input")]
        url: Option<String>,

        /// Most sections to return (at most 20)
        #[arg(long, default_value_t = MAX_SECTIONS)]
        max: usize,
    },

    /// Extract code from generation output
    Extract {
        /// Text file, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        /// Also print the component name and props
        #[arg(long)]
        metadata: bool,
    },

    /// Render a component in Chrome and save a screenshot
    Preview {
        /// Component source or generation output, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        /// Render at phone width (375px)
        #[arg(long)]
        mobile: bool,

        /// Where to write the PNG screenshot
        #[arg(long, short = 'o', default_value = "preview.png")]
        out: PathBuf,
    },

    /// Write a runnable sandbox project for a component
    Export {
        /// Component source or generation output, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        /// Target directory
        #[arg(long, short = 'd')]
        dir: PathBuf,
    },

    /// Manage saved components
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },
}

#[derive(Subcommand)]
enum LibraryAction {
    /// List saved components, newest first
    List,

    /// Search by name, section label or code
    Search { query: String },

    /// Delete a saved component
    Delete { id: String },

    /// Save a component
    Save {
        /// Component source or generation output, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        /// Display name (default: the component's function name)
        #[arg(long)]
        name: Option<String>,

        /// Label of the section it was generated from
        #[arg(long)]
        section_label: Option<String>,
    },
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))
    }
}

fn ensure_rendered(report: &PreviewReport) -> anyhow::Result<()> {
    if report.rendered() {
        return Ok(());
    }
    match &report.error {
        Some(error) => bail!("preview did not render: {}", error),
        None => bail!("preview did not render ({:?})", report.state),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();

    let cli = Cli::parse();
    let launch = LaunchOptions::new().headless(!cli.headed);
    let library = ComponentLibrary::open(cli.library);

    match cli.command {
        Command::Sections { input, url, max } => {
            let html = match (url, input) {
                (Some(url), _) => {
                    let session = BrowserSession::launch(launch)?;
                    let url = sitelift::tools::utils::normalize_url(&url);
                    let page = session.fetch_page(&url)?;
                    eprintln!("Fetched \"{}\"", page.title);
                    page.html
                }
                (None, Some(path)) => read_input(&path)?,
                (None, None) => bail!("either a FILE or --url is required"),
            };

            let config = SegmenterConfig {
                max_sections: max,
                ..SegmenterConfig::default()
            };
            let sections = Segmenter::new(config).segment(&html);
            eprintln!("Found {} section(s)", sections.len());
            print_json(&sections)?;
        }
        Command::Extract { input, metadata } => {
            let code = extract_code(&read_input(&input)?);
            if metadata {
                print_json(&serde_json::json!({
                    "code": code,
                    "metadata": ComponentMetadata::parse(&code),
                }))?;
            } else {
                println!("{}", code);
            }
        }
        Command::Preview { input, mobile, out } => {
            let code = extract_code(&read_input(&input)?);
            let viewport = if mobile {
                Viewport::Mobile
            } else {
                Viewport::Desktop
            };

            let session = BrowserSession::launch(launch.viewport(viewport))?;
            let report = session.render_preview(&code, viewport, PreviewConfig::default())?;
            std::fs::write(&out, &report.screenshot)
                .with_context(|| format!("writing {}", out.display()))?;
            eprintln!("Screenshot written to {}", out.display());

            print_json(&serde_json::json!({
                "rendered": report.rendered(),
                "state": format!("{:?}", report.state),
                "error": report.error,
                "width": report.width,
                "screenshot": out,
            }))?;

            // returning an error unwinds main, so the session drops and Chrome exits
            ensure_rendered(&report)?;
        }
        Command::Export { input, dir } => {
            let project = SandboxProject::from_code(&extract_code(&read_input(&input)?));
            let written = project.write_to(&dir)?;
            eprintln!("Wrote {} file(s) for {}", written.len(), project.component_name);
            print_json(&written)?;
        }
        Command::Library { action } => match action {
            LibraryAction::List => print_json(&library.list())?,
            LibraryAction::Search { query } => print_json(&library.search(&query))?,
            LibraryAction::Delete { id } => {
                if !library.delete(&id)? {
                    bail!("no saved component with id {}", id);
                }
                eprintln!("Deleted {}", id);
            }
            LibraryAction::Save {
                input,
                name,
                section_label,
            } => {
                let code = extract_code(&read_input(&input)?);
                let name = name.unwrap_or_else(|| ComponentMetadata::parse(&code).name);
                let mut component = NewComponent::new(name, code);
                component.section_label = section_label;
                let saved = library.save(component)?;
                print_json(&saved)?;
            }
        },
    }

    Ok(())
}
