//! First-person camera on a horizontal plane.
//!
//! [`CameraState`] keeps the position and the yaw/pitch/field-of-view angles in degrees.
//! The look direction `front` is derived from yaw and pitch whenever the orientation
//! changes and is never written directly. Input handlers clamp instead of rejecting,
//! so the camera is always in a valid state:
//! - pitch stays within [`PITCH_LIMIT`] degrees of the horizon
//! - yaw is kept in `[-180, 180)` degrees
//! - the field of view stays within [`MIN_FOV`]..=[`MAX_FOV`] degrees
//! - `front` stays unit length

use std::fmt;

use cgmath::{Deg, InnerSpace, Matrix4, Point2, Point3, Vector3};

pub mod controller;
pub mod projection;
pub mod uniform;

pub use controller::CameraController;
pub use projection::Projection;
pub use uniform::CameraUniform;

pub const PITCH_LIMIT: f32 = 89.0;
pub const MIN_FOV: f32 = 1.0;
pub const MAX_FOV: f32 = 45.0;

/// Degrees to radians.
pub fn radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Start values and tuning of a [`CameraState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub position: Point3<f32>,
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
    pub fov: Deg<f32>,
    /// World units per second.
    pub speed: f32,
    /// Degrees per pixel of cursor travel.
    pub sensitivity: f32,
    /// Pins `position.y` to zero after every movement.
    pub ground_locked: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            yaw: Deg(-90.0),
            pitch: Deg(0.0),
            fov: Deg(45.0),
            speed: 2.5,
            sensitivity: 0.1,
            ground_locked: true,
        }
    }
}

impl CameraSettings {
    pub fn with_position<P: Into<Point3<f32>>>(mut self, position: P) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_orientation<Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(mut self, yaw: Y, pitch: P) -> Self {
        self.yaw = yaw.into();
        self.pitch = pitch.into();
        self
    }

    pub fn with_fov<F: Into<Deg<f32>>>(mut self, fov: F) -> Self {
        self.fov = fov.into();
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_ground_lock(mut self, ground_locked: bool) -> Self {
        self.ground_locked = ground_locked;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct CameraState {
    position: Point3<f32>,
    yaw: Deg<f32>,
    pitch: Deg<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    fov: Deg<f32>,
    last_cursor: Option<Point2<f64>>,
    speed: f32,
    sensitivity: f32,
    ground_locked: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

impl CameraState {
    pub fn new(settings: CameraSettings) -> Self {
        let mut camera = Self {
            position: settings.position,
            yaw: Deg(-90.0),
            pitch: Deg(0.0),
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
            fov: Deg(settings.fov.0.clamp(MIN_FOV, MAX_FOV)),
            last_cursor: None,
            speed: settings.speed,
            sensitivity: settings.sensitivity,
            ground_locked: settings.ground_locked,
        };
        camera.set_orientation(settings.yaw, settings.pitch);
        camera
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn set_position<P: Into<Point3<f32>>>(&mut self, position: P) {
        self.position = position.into();
    }

    pub fn yaw(&self) -> Deg<f32> {
        self.yaw
    }

    pub fn pitch(&self) -> Deg<f32> {
        self.pitch
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn fov(&self) -> Deg<f32> {
        self.fov
    }

    /// The previous cursor sample, `None` until the first one arrived.
    pub fn last_cursor(&self) -> Option<Point2<f64>> {
        self.last_cursor
    }

    /// Sets yaw (wrapped) and pitch (clamped) and recomputes `front`.
    pub fn set_orientation<Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(&mut self, yaw: Y, pitch: P) {
        let (yaw, pitch) = (yaw.into(), pitch.into());
        if !yaw.0.is_finite() || !pitch.0.is_finite() {
            log::warn!("Ignoring non-finite orientation ({:?}, {:?})", yaw, pitch);
            return;
        }
        self.yaw = Deg((yaw.0 + 180.0).rem_euclid(360.0) - 180.0);
        self.pitch = Deg(pitch.0.clamp(-PITCH_LIMIT, PITCH_LIMIT));
        self.update_front();
    }

    fn update_front(&mut self) {
        let (yaw, pitch) = (radians(self.yaw.0), radians(self.pitch.0));
        let direction = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = direction.normalize();
    }

    /// Turns the camera by the cursor travel since the previous sample.
    ///
    /// The first sample only records the position. Screen y grows downwards, so
    /// the vertical delta is inverted to make moving the cursor up look up.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            log::warn!("Ignoring non-finite cursor position ({}, {})", x, y);
            return;
        }
        let Some(last) = self.last_cursor.replace(Point2::new(x, y)) else {
            return;
        };
        let sensitivity = f64::from(self.sensitivity);
        let dx = ((x - last.x) * sensitivity) as f32;
        let dy = ((last.y - y) * sensitivity) as f32;
        if !dx.is_finite() || !dy.is_finite() {
            log::warn!("Ignoring cursor jump from ({}, {}) to ({}, {})", last.x, last.y, x, y);
            return;
        }
        self.set_orientation(self.yaw + Deg(dx), self.pitch + Deg(dy));
    }

    /// Zoom: widens or narrows the field of view, clamped to [`MIN_FOV`]..=[`MAX_FOV`].
    pub fn on_scroll(&mut self, delta_y: f64) {
        if !delta_y.is_finite() {
            log::warn!("Ignoring non-finite scroll delta {}", delta_y);
            return;
        }
        self.fov = Deg((self.fov.0 + delta_y as f32).clamp(MIN_FOV, MAX_FOV));
    }

    /// Moves by `speed * elapsed_secs` along `front` or the strafe axis.
    pub fn translate(&mut self, movement: Movement, elapsed_secs: f32) {
        let step = self.speed * elapsed_secs;
        let right = self.front.cross(self.up).normalize();
        match movement {
            Movement::Forward => self.position += self.front * step,
            Movement::Backward => self.position -= self.front * step,
            Movement::Left => self.position -= right * step,
            Movement::Right => self.position += right * step,
        }
        if self.ground_locked {
            self.position.y = 0.0;
        }
    }

    pub fn move_forward(&mut self, elapsed_secs: f32) {
        self.translate(Movement::Forward, elapsed_secs);
    }

    pub fn move_backward(&mut self, elapsed_secs: f32) {
        self.translate(Movement::Backward, elapsed_secs);
    }

    pub fn move_left(&mut self, elapsed_secs: f32) {
        self.translate(Movement::Left, elapsed_secs);
    }

    pub fn move_right(&mut self, elapsed_secs: f32) {
        self.translate(Movement::Right, elapsed_secs);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// OpenGL-style perspective with the current field of view as vertical angle.
    pub fn projection_matrix(&self, aspect: f32, znear: f32, zfar: f32) -> Matrix4<f32> {
        cgmath::perspective(self.fov, aspect, znear, zfar)
    }
}

/// Prints a matrix row by row with two decimals.
pub struct MatrixRows<'a>(pub &'a Matrix4<f32>);

impl fmt::Display for MatrixRows<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // cgmath stores columns, print rows
        for row in 0..4 {
            for col in 0..4 {
                write!(f, "{:.2} ", self.0[col][row])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
