//! Event handler for the viewer window.
//!
//! Contains the [`App`] struct and its [`ApplicationHandler`] implementation.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::app::app_state::AppState;
use crate::board::BoardLayout;
use crate::config::Cli;
use crate::renderer::camera::TopDownCamera;
use crate::renderer::wgpu_lib::RendererError;

/// Events sent into the loop from outside winit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Ctrl-C was pressed in the terminal.
    Shutdown,
}

/// Window and camera settings taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub width: u32,
    pub height: u32,
    /// Fixed camera height; `None` fits the board to the window.
    pub camera_height: Option<f32>,
}

impl ViewerSettings {
    /// Camera for `layout` in a window of `width`×`height`.
    pub fn camera(&self, layout: &BoardLayout, width: u32, height: u32) -> TopDownCamera {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        match self.camera_height {
            Some(height) => TopDownCamera::fixed(height, aspect),
            None => {
                let border = 0.5 * layout.params().cell_size;
                TopDownCamera::fitting(layout.half_extent() + border, aspect)
            }
        }
    }
}

impl From<&Cli> for ViewerSettings {
    fn from(cli: &Cli) -> Self {
        Self {
            width: cli.width,
            height: cli.height,
            camera_height: cli.camera_height,
        }
    }
}

/// First fatal error seen by the viewer; later ones are only logged.
#[derive(Debug, Default)]
pub struct FatalError(Option<RendererError>);

impl FatalError {
    pub fn record(&mut self, error: RendererError) {
        tracing::error!(%error, "viewer failed");
        self.0.get_or_insert(error);
    }

    pub fn into_result(self) -> Result<(), RendererError> {
        match self.0 {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Viewer lifecycle.
///
/// 1. Created with [`App::new`] holding the shared layout.
/// 2. `resumed` opens the window and builds [`AppState`].
/// 3. Window events resize and redraw until the window closes or Ctrl-C arrives.
pub struct App {
    pub instance: wgpu::Instance,
    pub state: Option<AppState>,
    pub window: Option<Arc<Window>>,
    layout: Arc<BoardLayout>,
    settings: ViewerSettings,
    /// Reported once the loop has exited.
    error: FatalError,
}

impl App {
    pub fn new(layout: Arc<BoardLayout>, settings: ViewerSettings) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            window: None,
            layout,
            settings,
            error: FatalError::default(),
        }
    }

    /// Creates the surface and renderer for `window`.
    pub async fn set_window(&mut self, window: Window) -> Result<(), RendererError> {
        let window = Arc::new(window);
        let size = window.inner_size();
        let (width, height) = if size.width > 0 && size.height > 0 {
            (size.width, size.height)
        } else {
            (self.settings.width, self.settings.height)
        };

        let surface = self.instance.create_surface(window.clone())?;
        let camera = self.settings.camera(&self.layout, width, height);
        let state = AppState::new(
            &self.instance,
            surface,
            width,
            height,
            &self.layout,
            camera,
        )
        .await?;

        tracing::info!(width, height, camera_height = camera.height, "viewer ready");
        window.request_redraw();
        self.window = Some(window);
        self.state = Some(state);
        Ok(())
    }

    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        match &mut self.state {
            Some(state) => state.resize_surface(width, height),
            None => tracing::warn!("resize before the renderer was initialized"),
        }
    }

    /// Consumes the app after the loop exits, surfacing any fatal renderer error.
    pub fn into_result(self) -> Result<(), RendererError> {
        self.error.into_result()
    }

    /// Records `error` and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RendererError) {
        self.error.record(error);
        event_loop.exit();
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Pachisi")
            .with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(error) => {
                self.fail(event_loop, error.into());
                return;
            }
        };

        if let Err(error) = pollster::block_on(self.set_window(window)) {
            self.fail(event_loop, error);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Shutdown => {
                tracing::info!("interrupted, shutting down");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.handle_resized(size.width, size.height);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(state) = self.state.as_mut() else {
                    return;
                };
                if let Err(error) = state.render() {
                    self.fail(event_loop, error);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{LayoutParameters, generate};
    use clap::Parser;

    fn layout() -> Arc<BoardLayout> {
        Arc::new(generate(&LayoutParameters::default()).unwrap())
    }

    #[test]
    fn test_settings_from_cli() {
        let cli = Cli::try_parse_from(["pachisi", "--width", "800", "--camera-height", "12"])
            .unwrap();
        let settings = ViewerSettings::from(&cli);
        assert_eq!(settings.width, 800);
        assert_eq!(settings.height, 768);
        assert_eq!(settings.camera_height, Some(12.0));
    }

    #[test]
    fn test_first_fatal_error_is_kept() {
        assert!(FatalError::default().into_result().is_ok());

        let mut error = FatalError::default();
        error.record(RendererError::NoAdapter);
        error.record(RendererError::OutOfMemory);
        assert!(matches!(error.into_result(), Err(RendererError::NoAdapter)));
    }

    #[test]
    fn test_camera_choice() {
        let layout = layout();
        let fixed = ViewerSettings {
            width: 1360,
            height: 768,
            camera_height: Some(10.0),
        };
        assert_eq!(fixed.camera(&layout, 1360, 768).height, 10.0);

        let fitted = ViewerSettings {
            camera_height: None,
            ..fixed
        };
        let wide = fitted.camera(&layout, 1360, 768);
        let tall = fitted.camera(&layout, 400, 800);
        assert!(wide.height > 0.0);
        assert!(tall.height > wide.height);
    }
}
