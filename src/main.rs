//! Pachisi board viewer
//!
//! Generates a board from command-line/environment parameters, then either writes
//! it out (`--export` JSON, `--snapshot` PNG) or shows it in a window until the
//! window is closed or Ctrl-C is pressed.
//!
//! # Usage
//! `pachisi --board-size 15 --section-size 6 --colors green,blue,red,yellow`
//!
//! Set `RUST_LOG=pachisi=debug` for builder-level logging.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use pachisi::app::{App, AppEvent, ViewerSettings};
use pachisi::board::{BoardLayout, LayoutError, generate};
use pachisi::config::{Cli, output_path};
use pachisi::renderer::snapshot;
use pachisi::renderer::wgpu_lib::RendererError;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode layout: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write snapshot: {0}")]
    Image(#[from] image::ImageError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

fn main() -> ExitCode {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pachisi=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "pachisi failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let params = cli.layout_parameters()?;
    let layout = Arc::new(generate(&params)?);

    if cli.is_headless() {
        if let Some(path) = &cli.export {
            export_json(&layout, path)?;
        }
        if let Some(path) = &cli.snapshot {
            export_png(&layout, path, cli.pixels_per_unit)?;
        }
        return Ok(());
    }

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let proxy = event_loop.create_proxy();
    if let Err(error) = ctrlc::set_handler(move || {
        // The loop may already be gone when Ctrl-C arrives during shutdown.
        let _ = proxy.send_event(AppEvent::Shutdown);
    }) {
        tracing::warn!(%error, "Ctrl-C handler not installed");
    }

    let mut app = App::new(layout, ViewerSettings::from(cli));
    event_loop.run_app(&mut app)?;
    app.into_result()?;
    Ok(())
}

fn export_json(layout: &BoardLayout, path: &Path) -> Result<(), AppError> {
    let path = output_path(path, "json");
    let json = layout.to_json()?;
    fs::write(&path, json).map_err(|source| AppError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = layout.primitive_count(), "layout exported");
    Ok(())
}

fn export_png(layout: &BoardLayout, path: &Path, pixels_per_unit: u32) -> Result<(), AppError> {
    let path = output_path(path, "png");
    let image = snapshot::rasterize(layout, pixels_per_unit);
    image.save(&path)?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "snapshot written"
    );
    Ok(())
}
