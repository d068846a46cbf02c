//! menukit demo — a small axum app exercising every menu feature:
//! main menus, tab bars with partial updates, button groups, dropdowns,
//! breadcrumbs, badges with timer refresh, and context menus.

use clap::Parser;

mod app;
mod assets;
mod pages;

#[derive(Parser)]
#[command(
    name = "menukit-demo",
    about = "menukit demo application",
    version,
    author
)]
struct Cli {
    /// Override the port
    #[arg(short, long)]
    port: Option<u16>,

    /// Settings file (also read from MENUKIT_CONFIG)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut settings = match &cli.config {
        Some(path) => menukit_config::MenuSettings::load(path)?,
        None => menukit_config::MenuSettings::load_or_default()?,
    };
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    app::serve(settings).await
}
