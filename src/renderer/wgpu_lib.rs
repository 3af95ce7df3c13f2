//! WGPU device and surface lifecycle.
//!
//! [`WgpuRenderer`] owns the surface, device and queue, configures the swap chain
//! and forwards each frame to the [`BoardRenderer`].

use crate::board::BoardLayout;
use crate::renderer::board_renderer::BoardRenderer;
use crate::renderer::camera::TopDownCamera;

#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no graphics adapter is compatible with the window surface")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("GPU is out of memory")]
    OutOfMemory,
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),
}

pub struct WgpuRenderer {
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub board_renderer: BoardRenderer,
}

impl WgpuRenderer {
    /// Acquires an adapter and device for `surface` and uploads `layout`.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        layout: &BoardLayout,
        camera: TopDownCamera,
    ) -> Result<Self, RendererError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(RendererError::NoAdapter)?;
        tracing::info!(adapter = ?adapter.get_info().name, "graphics adapter selected");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;
        surface.configure(&device, &surface_config);

        let board_renderer = BoardRenderer::new(&device, &surface_config, layout, camera);

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            board_renderer,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, RendererError> {
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|&&f| f == wgpu::TextureFormat::Bgra8UnormSrgb)
            .or_else(|| capabilities.formats.iter().find(|f| f.is_srgb()))
            .or_else(|| capabilities.formats.first())
            .copied()
            .ok_or(RendererError::NoSurfaceFormat)?;
        if !format.is_srgb() {
            tracing::warn!(?format, "no sRGB surface format; colors are written unconverted");
        }

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        })
    }

    /// Reconfigures the surface and camera for a new window size. Zero-sized
    /// (minimized) windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.board_renderer
            .set_aspect(&self.queue, width as f32 / height as f32);
        tracing::debug!(width, height, "surface resized");
    }

    /// Draws one frame. A lost or outdated surface is reconfigured and the frame
    /// skipped; running out of memory is fatal.
    pub fn render(&mut self) -> Result<(), RendererError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RendererError::OutOfMemory),
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("timed out acquiring the next frame");
                return Ok(());
            }
            Err(error) => {
                tracing::warn!(%error, "surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
        };

        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (width, height) = (self.surface_config.width, self.surface_config.height);
        let depth_view = self
            .board_renderer
            .update_depth_texture(&self.device, width, height);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Board Encoder"),
            });
        self.board_renderer
            .render(&mut encoder, &surface_view, &depth_view);
        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
