//! Shader program construction.
//!
//! A program is built from one vertex stage and one fragment stage. Both sources are read
//! first, then each stage is compiled by a [`ShaderBackend`], the two stages are linked and
//! the intermediate stages are released again. Only the linked program survives.
//!
//! Backends:
//! - [`naga_backend::NagaBackend`]: headless WGSL validation, no device required
//! - [`wgpu_backend::WgpuBackend`]: shader modules and a render pipeline on a `wgpu::Device`

use std::{fmt, path::Path, str::Utf8Error};

use crate::resources::{ResourceError, ShaderSources, SourceText};

pub mod naga_backend;
pub mod wgpu_backend;

/// Size of the buffer compiler and linker diagnostics are copied into.
/// Logs are cut to `INFO_LOG_CAPACITY - 1` bytes, leaving room for a terminator.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderBuildError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("{stage} shader source is not valid UTF-8")]
    Encoding {
        stage: StageKind,
        #[source]
        error: Utf8Error,
    },
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: StageKind, log: String },
    #[error("shader program link failed: {log}")]
    Link { log: String },
}

/// The graphics API side of program construction.
///
/// `compile_stage` and `link_program` report failure with the diagnostic log of the
/// API. Stages handed back through `delete_stage` are not used again.
pub trait ShaderBackend {
    type Stage;
    type Program;

    fn compile_stage(
        &mut self,
        kind: StageKind,
        label: &str,
        source: &str,
    ) -> Result<Self::Stage, String>;

    fn link_program(
        &mut self,
        label: &str,
        vertex: &Self::Stage,
        fragment: &Self::Stage,
    ) -> Result<Self::Program, String>;

    fn delete_stage(&mut self, stage: Self::Stage) {
        drop(stage);
    }
}

/// A linked program. The intermediate stages are gone by the time this exists.
#[derive(Debug)]
pub struct ShaderProgram<P> {
    label: String,
    handle: P,
}

impl<P> ShaderProgram<P> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handle(&self) -> &P {
        &self.handle
    }

    pub fn into_handle(self) -> P {
        self.handle
    }
}

/// Reads both files and builds a program from them.
///
/// The program label is derived from the vertex file stem.
pub fn build_program<B: ShaderBackend>(
    backend: &mut B,
    vertex_file: impl AsRef<Path>,
    fragment_file: impl AsRef<Path>,
) -> Result<ShaderProgram<B::Program>, ShaderBuildError> {
    let vertex_file = vertex_file.as_ref();
    let sources = ShaderSources::load(vertex_file, fragment_file)?;
    let label = vertex_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "shader".to_string());
    build_from_sources(backend, &label, &sources)
}

/// Builds a program from in-memory WGSL.
pub fn build_program_from_source<B: ShaderBackend>(
    backend: &mut B,
    label: &str,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram<B::Program>, ShaderBuildError> {
    let sources = ShaderSources::from_source(vertex_source, fragment_source);
    build_from_sources(backend, label, &sources)
}

fn build_from_sources<B: ShaderBackend>(
    backend: &mut B,
    label: &str,
    sources: &ShaderSources,
) -> Result<ShaderProgram<B::Program>, ShaderBuildError> {
    let vertex_source = stage_source(StageKind::Vertex, &sources.vertex)?;
    let fragment_source = stage_source(StageKind::Fragment, &sources.fragment)?;

    let vertex = compile(backend, StageKind::Vertex, label, vertex_source)?;
    let fragment = match compile(backend, StageKind::Fragment, label, fragment_source) {
        Ok(fragment) => fragment,
        Err(e) => {
            backend.delete_stage(vertex);
            return Err(e);
        }
    };

    let linked = backend.link_program(label, &vertex, &fragment);
    backend.delete_stage(vertex);
    backend.delete_stage(fragment);

    let handle = linked.map_err(|diagnostic| {
        let log = truncate_log(diagnostic);
        log::error!("ERROR SHADER Program LINKING_FAILED {}", log);
        ShaderBuildError::Link { log }
    })?;

    log::info!("Shader program loaded");
    Ok(ShaderProgram {
        label: label.to_string(),
        handle,
    })
}

fn stage_source(stage: StageKind, text: &SourceText) -> Result<&str, ShaderBuildError> {
    text.to_str()
        .map_err(|error| ShaderBuildError::Encoding { stage, error })
}

fn compile<B: ShaderBackend>(
    backend: &mut B,
    stage: StageKind,
    label: &str,
    source: &str,
) -> Result<B::Stage, ShaderBuildError> {
    backend.compile_stage(stage, label, source).map_err(|diagnostic| {
        let log = truncate_log(diagnostic);
        log::error!("ERROR SHADER {} COMPILATION_FAILED {}", stage, log);
        ShaderBuildError::Compile { stage, log }
    })
}

/// Cuts a diagnostic to what fits into the info log buffer, on a char boundary.
pub fn truncate_log(mut diagnostic: String) -> String {
    let limit = INFO_LOG_CAPACITY - 1;
    if diagnostic.len() > limit {
        let mut end = limit;
        while !diagnostic.is_char_boundary(end) {
            end -= 1;
        }
        diagnostic.truncate(end);
    }
    diagnostic
}
