#![allow(dead_code)]

use std::path::PathBuf;

use flow_scaffold::pipelines::{ShaderBackend, StageKind};
use tempfile::TempDir;

pub const VERTEX_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
}

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position, 1.0);
    out.color = vec3<f32>(1.0, 0.5, 0.2);
    return out;
}
"#;

pub const FRAGMENT_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

/// Missing the closing parenthesis of the return expression.
pub const BROKEN_FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 0.0, 1.0;
}
"#;

/// Reads `@location(1)`, which [`VERTEX_SHADER`] never writes.
pub const UNMATCHED_FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main(@location(1) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 0.0, 1.0);
}
"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A temporary directory holding fixture files.
pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

pub fn asset(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join("shaders")
        .join(name)
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Compile(StageKind),
    Link,
    Delete(StageKind),
}

/// Records every call and fails the stages it is told to fail.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    pub fail_compile: Option<(StageKind, String)>,
    pub fail_link: Option<String>,
}

impl ShaderBackend for RecordingBackend {
    type Stage = StageKind;
    type Program = u32;

    fn compile_stage(&mut self, kind: StageKind, _: &str, _: &str) -> Result<StageKind, String> {
        self.calls.push(Call::Compile(kind));
        match &self.fail_compile {
            Some((stage, log)) if *stage == kind => Err(log.clone()),
            _ => Ok(kind),
        }
    }

    fn link_program(&mut self, _: &str, _: &StageKind, _: &StageKind) -> Result<u32, String> {
        self.calls.push(Call::Link);
        match &self.fail_link {
            Some(log) => Err(log.clone()),
            None => Ok(7),
        }
    }

    fn delete_stage(&mut self, stage: StageKind) {
        self.calls.push(Call::Delete(stage));
    }
}
