//! Command-line and environment configuration.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;

use crate::board::params::quadrant_colors;
use crate::board::{BoardVariant, Color, LayoutError, LayoutParameters};
use crate::renderer::snapshot::MAX_PIXELS_PER_UNIT;

#[derive(Parser, Debug, Clone)]
#[command(name = "pachisi", about = "Generate and view a Pachisi board")]
pub struct Cli {
    /// Cells per board side; odd, at least 11.
    #[arg(long, env = "PACHISI_BOARD_SIZE", default_value_t = 15)]
    pub board_size: u32,

    /// Home section side length in cells.
    #[arg(long, env = "PACHISI_SECTION_SIZE", default_value_t = 6)]
    pub section_size: u32,

    /// Four comma-separated colors: top-left, top-right, bottom-left, bottom-right.
    #[arg(long, env = "PACHISI_COLORS", default_value = "green,blue,red,yellow")]
    pub colors: String,

    /// World units per cell.
    #[arg(long, env = "PACHISI_CELL_SIZE", default_value_t = 1.0)]
    pub cell_size: f32,

    /// `classic` or `minimal`.
    #[arg(long, env = "PACHISI_VARIANT", default_value = "classic")]
    pub variant: BoardVariant,

    #[arg(long, default_value_t = 1360)]
    pub width: u32,

    #[arg(long, default_value_t = 768)]
    pub height: u32,

    /// Fixed camera height; the camera fits the board when omitted.
    #[arg(long)]
    pub camera_height: Option<f32>,

    /// Write the layout as JSON and exit. A directory gets a timestamped file name.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Write a top-down PNG of the layout and exit.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Snapshot resolution in pixels per world unit.
    #[arg(
        long,
        default_value_t = 32,
        value_parser = clap::value_parser!(u32).range(1..=MAX_PIXELS_PER_UNIT as i64)
    )]
    pub pixels_per_unit: u32,
}

impl Cli {
    /// Builds validated layout parameters from the parsed flags.
    pub fn layout_parameters(&self) -> Result<LayoutParameters, LayoutError> {
        let colors = parse_colors(&self.colors)?;
        let params = LayoutParameters {
            board_size: self.board_size,
            section_size: self.section_size,
            colors: quadrant_colors(&colors)?,
            cell_size: self.cell_size,
            style: self.variant.style(),
        };
        params.validate()?;
        Ok(params)
    }

    /// True when the run only writes files and never opens a window.
    pub fn is_headless(&self) -> bool {
        self.export.is_some() || self.snapshot.is_some()
    }
}

/// Parses a comma-separated color list. The count is checked by
/// [`quadrant_colors`].
pub fn parse_colors(list: &str) -> Result<Vec<Color>, LayoutError> {
    list.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Uses `path` as given, unless it names a directory, in which case a
/// `Board_<timestamp>.<extension>` file inside it is chosen.
pub fn output_path(path: &Path, extension: &str) -> PathBuf {
    if path.is_dir() {
        let name = Local::now()
            .format(&format!("Board_%m-%d-%y_%I-%M%p.{extension}"))
            .to_string();
        path.join(name)
    } else {
        path.to_path_buf()
    }
}
