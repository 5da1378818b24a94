//! flow-scaffold
//!
//! The engineering core of a small real-time 3D renderer: turning WGSL shader
//! sources into linked GPU programs and turning user input into a moving
//! first-person camera that yields view/projection matrices every frame.
//! Window creation, vertex data and draw calls stay with the caller.
//!
//! High-level modules
//! - `camera`: camera state, projection, winit controller and GPU uniform
//! - `frame`: per-frame driver tying clock, controller and uniform together
//! - `pipelines`: shader program building over naga or wgpu
//! - `resources`: growable text buffer and shader source loading
//! - `time`: frame clock
//!

pub mod camera;
pub mod frame;
pub mod pipelines;
pub mod resources;
pub mod time;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::event::WindowEvent;

/// Installs the platform logger. A logger that is already installed is kept.
pub fn init_logger() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
