//! Per-frame camera driver.
//!
//! The render loop owns a [`Viewer`] and, each frame:
//! 1. forwards window events through [`Viewer::handle_window_event`]
//! 2. calls [`Viewer::update`] to apply held movement and refresh the uniform
//! 3. uploads [`Viewer::uniform`] to the GPU before drawing

use instant::Duration;
use winit::event::WindowEvent;

use crate::{
    camera::{CameraController, CameraSettings, CameraState, CameraUniform, MatrixRows, Projection},
    time::FrameClock,
};

#[derive(Debug, Clone)]
pub struct Viewer {
    pub camera: CameraState,
    pub controller: CameraController,
    pub projection: Projection,
    uniform: CameraUniform,
    clock: FrameClock,
}

impl Viewer {
    pub fn new(settings: CameraSettings, projection: Projection) -> Self {
        let camera = CameraState::new(settings);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, &projection);
        Self {
            camera,
            controller: CameraController::new(),
            projection,
            uniform,
            clock: FrameClock::new(),
        }
    }

    /// Returns `true` if the event changed the camera or its projection.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        if let WindowEvent::Resized(size) = event {
            self.projection.resize(size.width, size.height);
            return true;
        }
        self.controller.handle_window_events(&mut self.camera, event)
    }

    /// Advances by the wall-clock time since the previous frame.
    pub fn update(&mut self) -> &CameraUniform {
        let dt = self.clock.tick();
        self.update_with(dt)
    }

    pub fn update_with(&mut self, dt: Duration) -> &CameraUniform {
        self.controller.update(&mut self.camera, dt);
        self.uniform.update_view_proj(&self.camera, &self.projection);
        log::trace!("view:\n{}", MatrixRows(&self.camera.view_matrix()));
        &self.uniform
    }

    pub fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    /// Seconds since the viewer was created.
    pub fn time(&self) -> f32 {
        self.clock.total().as_secs_f32()
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(CameraSettings::default(), Projection::default())
    }
}
