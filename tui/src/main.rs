use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use color_eyre::eyre::WrapErr;
use color_eyre::eyre::eyre;
use praxis_core::Dataset;
use praxis_core::MotifCatalog;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "praxis",
    about = "Terminal dashboard for the matrix writing project"
)]
struct Cli {
    /// Load a dataset JSON file instead of the bundled sample.
    #[arg(long, value_name = "PATH")]
    dataset: Option<PathBuf>,

    /// Directory for drafts and logs (defaults to the platform data dir).
    #[arg(long, value_name = "PATH")]
    state_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let state_dir = resolve_state_dir(cli.state_dir)?;
    fs::create_dir_all(&state_dir)
        .wrap_err_with(|| format!("create state dir {}", state_dir.display()))?;
    let _log_guard = init_logging(&state_dir);

    let dataset = match &cli.dataset {
        Some(path) => Dataset::load(path)
            .wrap_err_with(|| format!("load dataset from {}", path.display()))?,
        None => Dataset::builtin().wrap_err("parse bundled dataset")?,
    };
    let motifs = MotifCatalog::standard().wrap_err("compile motif catalog")?;

    tracing::info!(
        parts = dataset.parts.len(),
        chapters = dataset.chapter_count(),
        "dataset loaded"
    );
    praxis_tui::run_dashboard(Arc::new(dataset), motifs, &state_dir).await
}

fn resolve_state_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join("praxis"))
        .ok_or_else(|| eyre!("no platform data dir; pass --state-dir"))
}

/// Log to a file in the state dir; stdout belongs to the TUI. The guard
/// must stay alive for the process lifetime or buffered lines are lost.
fn init_logging(state_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    let appender = tracing_appender::rolling::never(state_dir, "praxis.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}
