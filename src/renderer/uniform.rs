//! Uniform buffer for the board pipelines.
//!
//! [`Uniforms`] holds the camera's view-projection matrix and knows how to upload
//! itself and build the matching bind group.

use wgpu::util::DeviceExt;

use crate::math::Mat4;
use crate::renderer::camera::TopDownCamera;
use crate::renderer::pipeline_builder::BindGroupLayoutBuilder;

/// Uniforms shared by the fill and outline pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    /// View-projection matrix, column-major.
    pub matrix: [[f32; 4]; 4],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            matrix: Mat4::identity().into(),
        }
    }
}

impl Uniforms {
    pub fn from_camera(camera: &TopDownCamera) -> Self {
        Self {
            matrix: camera.view_projection().into(),
        }
    }

    /// Returns the raw bytes of the uniform struct for uploading to the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Creates a GPU buffer containing the uniform data, writable after creation.
    pub fn create_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: self.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    /// Creates a bind group and layout exposing `buffer` at binding 0 to the vertex stage.
    pub fn create_bind_group(
        &self,
        buffer: &wgpu::Buffer,
        device: &wgpu::Device,
    ) -> (wgpu::BindGroup, wgpu::BindGroupLayout) {
        let layout = BindGroupLayoutBuilder::new(device)
            .with_label("uniform_bind_group_layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX)
            .build();
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });
        (bind_group, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_matches_wgsl_mat4() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 64);
        assert_eq!(Uniforms::default().as_bytes().len(), 64);
    }

    #[test]
    fn test_uniforms_carry_camera_matrix() {
        let camera = TopDownCamera::fixed(10.0, 1.5);
        let uniforms = Uniforms::from_camera(&camera);
        assert_eq!(Mat4(uniforms.matrix), camera.view_projection());
    }
}
