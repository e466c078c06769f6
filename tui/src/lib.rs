//! Terminal dashboard for the matrix writing project: master/part
//! navigation, lens and status filters, golden-thread tracing, a command
//! palette, and a per-chapter drafting overlay with debounced persistence.

use std::path::Path;
use std::sync::Arc;

use color_eyre::eyre::Result;
use praxis_core::Dataset;
use praxis_core::MotifCatalog;

mod app;
mod app_event;
mod app_event_sender;
mod autosave;
mod command_palette;
mod controller;
mod draft_store;
mod focus_view;
mod heatmap;
mod master_view;
mod part_view;
mod text_formatting;
mod toast;
mod tui;

/// Run the dashboard until the user exits. Owns the terminal for the whole
/// call: raw mode and the alternate screen are entered here and restored on
/// every exit path.
pub async fn run_dashboard(
    dataset: Arc<Dataset>,
    motifs: MotifCatalog,
    state_dir: &Path,
) -> Result<()> {
    tui::Tui::install_panic_hook();
    let mut tui = tui::Tui::new()?;
    let result = app::App::run(&mut tui, dataset, motifs, state_dir).await;
    tui::Tui::restore();
    result
}
