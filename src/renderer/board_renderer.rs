//! Draws a [`BoardLayout`]: one pipeline for filled primitives, one for outlines.
//!
//! Both pipelines share the board shader, the camera uniform and a depth buffer.
//! Elevations in the layout keep later layers in front; outlines are lifted just
//! above their primitive and use `LessEqual` so they are never hidden by it.

use wgpu::util::DeviceExt;

use crate::board::{BoardLayout, Color};
use crate::renderer::camera::TopDownCamera;
use crate::renderer::pipeline_builder::{DEPTH_FORMAT, PipelineBuilder, depth_state};
use crate::renderer::uniform::Uniforms;
use crate::renderer::vertex::{BoardMesh, Vertex};

const SHADER: &str = include_str!("shaders/board.wgsl");

/// Uploaded vertex data for one pipeline. Empty meshes get no buffer.
struct GpuMesh {
    buffer: Option<wgpu::Buffer>,
    count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        let buffer = (!vertices.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        Self {
            buffer,
            count: vertices.len() as u32,
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>, pipeline: &wgpu::RenderPipeline) {
        if let Some(buffer) = &self.buffer {
            pass.set_pipeline(pipeline);
            pass.set_vertex_buffer(0, buffer.slice(..));
            pass.draw(0..self.count, 0..1);
        }
    }
}

pub struct BoardRenderer {
    fill_pipeline: wgpu::RenderPipeline,
    outline_pipeline: wgpu::RenderPipeline,
    fills: GpuMesh,
    outlines: GpuMesh,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    /// Recreated whenever the surface size changes.
    depth_texture: Option<wgpu::Texture>,
    pub camera: TopDownCamera,
    clear_color: wgpu::Color,
}

impl BoardRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_config: &wgpu::SurfaceConfiguration,
        layout: &BoardLayout,
        camera: TopDownCamera,
    ) -> Self {
        let uniforms = Uniforms::from_camera(&camera);
        let uniform_buffer = uniforms.create_buffer(device);
        let (uniform_bind_group, uniform_bind_group_layout) =
            uniforms.create_bind_group(&uniform_buffer, device);

        let decode_srgb = if surface_config.format.is_srgb() { 1.0 } else { 0.0 };

        let fill_pipeline = PipelineBuilder::new(device, surface_config.format, SHADER)
            .with_label("Board Fill Pipeline")
            .with_constant("DECODE_SRGB", decode_srgb)
            .with_vertex_buffer(Vertex::desc())
            .with_bind_group_layout(&uniform_bind_group_layout)
            .with_no_culling()
            .with_depth_stencil(depth_state())
            .build();

        let outline_pipeline = PipelineBuilder::new(device, surface_config.format, SHADER)
            .with_label("Board Outline Pipeline")
            .with_constant("DECODE_SRGB", decode_srgb)
            .with_vertex_buffer(Vertex::desc())
            .with_bind_group_layout(&uniform_bind_group_layout)
            .with_topology(wgpu::PrimitiveTopology::LineList)
            .with_depth_stencil(depth_state())
            .build();

        let mesh = BoardMesh::from_layout(layout);
        let fills = GpuMesh::upload(device, "Board Fill Vertices", &mesh.fills);
        let outlines = GpuMesh::upload(device, "Board Outline Vertices", &mesh.lines);

        let clear_color = clear_color(layout.params().style.background, surface_config.format);

        Self {
            fill_pipeline,
            outline_pipeline,
            fills,
            outlines,
            uniform_buffer,
            uniform_bind_group,
            depth_texture: None,
            camera,
            clear_color,
        }
    }

    /// Applies a new aspect ratio to the camera and uploads the new matrix.
    pub fn set_aspect(&mut self, queue: &wgpu::Queue, aspect: f32) {
        self.camera.set_aspect(aspect);
        let uniforms = Uniforms::from_camera(&self.camera);
        queue.write_buffer(&self.uniform_buffer, 0, uniforms.as_bytes());
    }

    /// Returns a depth view matching `width`×`height`, recreating the texture when
    /// the size changed.
    pub fn update_depth_texture(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = match self.depth_texture.take() {
            Some(texture) if texture.width() == width && texture.height() == height => texture,
            _ => device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            }),
        };
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth_texture = Some(texture);
        view
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Board Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        self.fills.draw(&mut pass, &self.fill_pipeline);
        self.outlines.draw(&mut pass, &self.outline_pipeline);
    }
}

/// Background clear value for `format`. sRGB targets take linear values.
fn clear_color(background: Color, format: wgpu::TextureFormat) -> wgpu::Color {
    let channel = |c: u8| {
        if format.is_srgb() {
            srgb_to_linear(c)
        } else {
            f64::from(c) / 255.0
        }
    };
    wgpu::Color {
        r: channel(background.r),
        g: channel(background.g),
        b: channel(background.b),
        a: 1.0,
    }
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
