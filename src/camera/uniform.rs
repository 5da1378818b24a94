use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use super::{CameraState, Projection};

/// Camera data as the shaders see it.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_position: [0.0; 4],
            view: Matrix4::<f32>::identity().into(),
            proj: Matrix4::<f32>::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &CameraState, projection: &Projection) {
        self.view_position = camera.position().to_homogeneous().into();
        self.view = camera.view_matrix().into();
        self.proj = projection.calc_wgpu_matrix(camera).into();
    }

    pub fn view_position(&self) -> [f32; 4] {
        self.view_position
    }

    pub fn view(&self) -> Matrix4<f32> {
        self.view.into()
    }

    pub fn proj(&self) -> Matrix4<f32> {
        self.proj.into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mk_camera_buffer(device: &wgpu::Device, camera_uniform: &CameraUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Camera Buffer"),
        contents: bytemuck::cast_slice(&[*camera_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("camera_bind_group_layout"),
    })
}

pub fn mk_camera_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    camera_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: camera_buffer.as_entire_binding(),
        }],
        label: Some("camera_bind_group"),
    })
}

/// Uploads the uniform into a buffer made by [`mk_camera_buffer`].
pub fn write_camera_buffer(queue: &wgpu::Queue, buffer: &wgpu::Buffer, camera_uniform: &CameraUniform) {
    queue.write_buffer(buffer, 0, bytemuck::cast_slice(&[*camera_uniform]));
}
