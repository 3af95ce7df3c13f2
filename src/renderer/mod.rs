//! Rendering of a generated board.
//!
//! The GPU path tessellates a layout into vertex buffers and draws it with wgpu
//! through a top-down camera. [`snapshot`] paints the same layout on the CPU.

/// Board fill and outline pipelines.
pub mod board_renderer;
/// Top-down camera.
pub mod camera;
/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// CPU rasterizer for PNG snapshots.
pub mod snapshot;
/// Camera uniform buffer.
pub mod uniform;
/// Vertex layout and tessellation.
pub mod vertex;
/// Core WGPU device and surface handling.
pub mod wgpu_lib;
