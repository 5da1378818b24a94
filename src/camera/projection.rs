use cgmath::Matrix4;

use super::CameraState;

/// wgpu clips depth to 0..1 while the OpenGL-style perspective maps it to -1..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Viewport size and clip planes. The field of view lives on the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: u32,
    height: u32,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, znear: f32, zfar: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            znear,
            zfar,
        }
    }

    /// Zero-sized surfaces (minimised windows) keep the previous size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// OpenGL-style projection of `camera` for this viewport.
    pub fn calc_matrix(&self, camera: &CameraState) -> Matrix4<f32> {
        camera.projection_matrix(self.aspect(), self.znear, self.zfar)
    }

    /// Same as [`Projection::calc_matrix`] with depth remapped for wgpu.
    pub fn calc_wgpu_matrix(&self, camera: &CameraState) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.calc_matrix(camera)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(800, 600, 0.01, 100.0)
    }
}
