use std::path::Path;

use super::{load_text, ResourceError, SourceText};

/// The vertex and fragment source of one program, read before any GPU work starts.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: SourceText,
    pub fragment: SourceText,
}

impl ShaderSources {
    /// Reads both files. Nothing is handed to a graphics backend if either read fails.
    pub fn load(
        vertex_file: impl AsRef<Path>,
        fragment_file: impl AsRef<Path>,
    ) -> Result<Self, ResourceError> {
        let vertex = load_text(vertex_file)?;
        let fragment = load_text(fragment_file)?;
        Ok(Self { vertex, fragment })
    }

    pub fn from_source(vertex: &str, fragment: &str) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}
