//! Pachisi - procedural board layout
//!
//! Generates the geometry of a Pachisi/Ludo board (grid, colored cross path, home
//! sections, token-start markers and the central finishing wedges) from a handful
//! of parameters, and renders it top-down.
//!
//! - `board/`: the pure layout generator and its record schema
//! - `math/`: vectors and matrices shared by the generator and the renderer
//! - `renderer/`: wgpu pipelines, camera and a CPU snapshot rasterizer
//! - `app/`: the winit viewer
//! - `config`: command-line and environment configuration

pub mod app;
pub mod board;
pub mod config;
pub mod math;
pub mod renderer;
