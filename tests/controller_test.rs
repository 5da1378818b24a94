use std::time::Duration;

use flow_scaffold::{
    camera::{
        controller::{scroll_lines, SCROLL_PIXELS_PER_LINE},
        CameraController, CameraSettings, CameraState, CameraUniform, Movement, Projection,
    },
    frame::Viewer,
    time::FrameClock,
    WindowEvent,
};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

use crate::common::test_utils::assert_close;
mod common;

#[test]
fn should_hold_movement_keys_until_released() {
    let mut controller = CameraController::new();
    assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
    assert!(controller.is_moving(Movement::Forward));

    let mut camera = CameraState::default();
    controller.update(&mut camera, Duration::from_secs(1));
    assert_close(camera.position().z, -2.5);

    assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Released));
    controller.update(&mut camera, Duration::from_secs(1));
    assert_close(camera.position().z, -2.5);
}

#[test]
fn should_move_with_arrow_keys_like_wasd() {
    let mut controller = CameraController::new();
    controller.process_keyboard(KeyCode::ArrowRight, ElementState::Pressed);
    assert!(controller.is_moving(Movement::Right));

    let mut camera = CameraState::default();
    controller.update(&mut camera, Duration::from_millis(400));
    assert_close(camera.position().x, 1.0);
}

#[test]
fn should_cancel_out_opposite_keys() {
    let mut controller = CameraController::new();
    controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
    controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);

    let mut camera = CameraState::default();
    controller.update(&mut camera, Duration::from_secs(3));
    assert_close(camera.position().x, 0.0);
    assert_eq!(camera.position().y, 0.0);
}

#[test]
fn should_not_consume_other_keys() {
    let mut controller = CameraController::new();
    assert!(!controller.process_keyboard(KeyCode::Escape, ElementState::Pressed));
    assert!(!controller.process_keyboard(KeyCode::Space, ElementState::Pressed));
}

#[test]
fn should_release_all_keys_on_focus_loss() {
    let mut controller = CameraController::new();
    let mut camera = CameraState::default();
    controller.process_keyboard(KeyCode::KeyS, ElementState::Pressed);

    controller.handle_window_events(&mut camera, &WindowEvent::Focused(false));
    assert!(!controller.is_moving(Movement::Backward));
}

#[test]
fn should_measure_scroll_deltas_in_lines() {
    assert_eq!(scroll_lines(&MouseScrollDelta::LineDelta(0.0, -2.0)), -2.0);
    let pixels = MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 3.0 * SCROLL_PIXELS_PER_LINE));
    assert_close(scroll_lines(&pixels) as f32, 3.0);
}

#[test]
fn should_refresh_the_uniform_each_frame() {
    let mut viewer = Viewer::new(CameraSettings::default(), Projection::new(800, 600, 0.01, 100.0));
    viewer.controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);

    let uniform = *viewer.update_with(Duration::from_secs(2));

    assert_close(viewer.camera.position().z, -5.0);
    assert_eq!(uniform.view(), viewer.camera.view_matrix());
    assert_eq!(uniform.proj(), viewer.projection.calc_wgpu_matrix(&viewer.camera));
    assert_close(uniform.view_position()[2], -5.0);
    assert_eq!(uniform.view_position()[3], 1.0);
}

#[test]
fn should_resize_the_viewer_projection() {
    let mut viewer = Viewer::default();
    assert!(viewer.handle_window_event(&WindowEvent::Resized(PhysicalSize::new(1920, 960))));
    assert_close(viewer.projection.aspect(), 2.0);
}

#[test]
fn should_lay_out_the_camera_uniform_as_plain_old_data() {
    assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
    let uniform = CameraUniform::new();
    let bytes: &[u8] = bytemuck::bytes_of(&uniform);
    assert_eq!(bytes.len(), 144);
}

#[test]
fn should_measure_frame_time_forward() {
    let mut clock = FrameClock::new();
    std::thread::sleep(Duration::from_millis(5));
    let dt = clock.tick();
    assert!(dt >= Duration::from_millis(5));
    assert!(clock.total() >= dt);
}
