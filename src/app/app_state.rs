//! Per-window state of the viewer.

use crate::board::BoardLayout;
use crate::renderer::camera::TopDownCamera;
use crate::renderer::wgpu_lib::{RendererError, WgpuRenderer};

/// Everything that exists only while a window is open.
pub struct AppState {
    pub wgpu_renderer: WgpuRenderer,
}

impl AppState {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        layout: &BoardLayout,
        camera: TopDownCamera,
    ) -> Result<Self, RendererError> {
        let wgpu_renderer =
            WgpuRenderer::new(instance, surface, width, height, layout, camera).await?;
        Ok(Self { wgpu_renderer })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
    }

    pub fn render(&mut self) -> Result<(), RendererError> {
        self.wgpu_renderer.render()
    }
}
