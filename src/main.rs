use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookmap::models::{AppConfig, Document};
use bookmap::rendering::effects;
use bookmap::server;
use bookmap::services::{RenderOptions, RenderPipeline};

#[derive(Parser)]
#[command(name = "bookmap")]
#[command(about = "Bookmap - renders formatted book text onto map tiles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render a book file directly to PNG
    Render {
        /// Book file: plain text (one page) or a JSON array of pages
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path for the whole image
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory to write one PNG per map tile into
        #[arg(long)]
        tiles_dir: Option<PathBuf>,

        /// Seed for random backgrounds
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List installed font families
    Fonts,
    /// List available effects
    Effects,
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Render {
            input,
            output,
            tiles_dir,
            seed,
        }) => run_render_command(&input, output.as_deref(), tiles_dir.as_deref(), seed),
        Some(Commands::Fonts) => run_fonts_command(),
        Some(Commands::Effects) => {
            run_effects_command();
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Read a book file into pages.
fn read_document(path: &Path) -> anyhow::Result<Document> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let pages: Vec<String> = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Expected a JSON array of pages: {e}"))?;
        Ok(Document::new(pages))
    } else {
        Ok(Document::from_text(content))
    }
}

/// Render a book file to PNG (no server needed)
fn run_render_command(
    input: &Path,
    output: Option<&Path>,
    tiles_dir: Option<&Path>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    init_tracing("bookmap=warn");

    if output.is_none() && tiles_dir.is_none() {
        anyhow::bail!("Nothing to write. Pass --output and/or --tiles-dir");
    }

    let document = read_document(input)?;
    let pipeline = RenderPipeline::new(AppConfig::load());
    let result = pipeline
        .render(
            &document,
            RenderOptions {
                seed,
                tiles: tiles_dir.is_some(),
            },
        )
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    for line in &result.summary {
        println!("{line}");
    }
    println!("Procedure:");
    for line in &result.procedure {
        println!("{line}");
    }
    for line in &result.diagnostics {
        eprintln!("warning: {line}");
    }

    if let Some(path) = output {
        let png = result.to_png()?;
        std::fs::write(path, &png)?;
        println!("Rendered {} ({} bytes)", path.display(), png.len());
    }

    if let Some(dir) = tiles_dir {
        std::fs::create_dir_all(dir)?;
        for tile in &result.tiles {
            let path = dir.join(format!("tile_{}_{}.png", tile.x, tile.y));
            std::fs::write(&path, &tile.png)?;
        }
        println!("Wrote {} tiles to {}", result.tiles.len(), dir.display());
    }

    Ok(())
}

fn run_fonts_command() -> anyhow::Result<()> {
    init_tracing("bookmap=warn");

    let pipeline = RenderPipeline::new(AppConfig::load());
    let fonts = pipeline.fonts();
    if fonts.is_empty() {
        anyhow::bail!("No fonts are installed");
    }

    println!("Default: {}", fonts.default_family().unwrap_or("(none)"));
    for family in fonts.families() {
        println!("  {family}");
    }
    Ok(())
}

fn run_effects_command() {
    for effect in effects::registry() {
        println!("  {:<20} {}", effect.identifier(), effect.description());
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let textures_dir = std::env::var("TEXTURES_DIR").ok();
    let fonts_dir = std::env::var("FONTS_DIR").ok();

    println!("Bookmap v{VERSION}");
    println!("Renders formatted book text onto map tiles\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR    = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE  = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  TEXTURES_DIR = {}",
        textures_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  FONTS_DIR    = {}",
        fonts_dir.as_deref().unwrap_or("(not set)")
    );

    println!("\nCommands:");
    println!("  bookmap serve     Start the HTTP server");
    println!("  bookmap render    Render a book file to PNG");
    println!("  bookmap fonts     List installed font families");
    println!("  bookmap effects   List available effects");
    println!("\nRun 'bookmap --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    init_tracing("bookmap=debug,tower_http=debug");

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::load();

    tracing::info!(
        textures = %config.textures_dir.display(),
        fonts = %config.fonts_dir.display(),
        system_fonts = config.load_system_fonts,
        "Asset sources configured"
    );

    let state = server::create_app_state(config)?;
    let fonts = state.pipeline.fonts();
    if fonts.is_empty() {
        tracing::warn!("No fonts found; books with text will fail to render");
    } else {
        tracing::info!(
            faces = fonts.face_count(),
            default = ?fonts.default_family(),
            "Fonts loaded"
        );
    }

    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Bookmap server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
