use std::path::{Path, PathBuf};

/**
 * This module contains all logic for reading shader sources and other text assets from disk.
 */
pub mod shader;
pub mod text;

pub use shader::ShaderSources;
pub use text::{SourceText, TextBuffer};

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("couldn't open file {}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("couldn't read file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
    #[error("couldn't read text stream")]
    Io(#[from] std::io::Error),
    #[error("couldn't allocate {requested} bytes for a text buffer")]
    Allocation { requested: usize },
}

/// Loads a whole text file and returns its terminated contents.
pub fn load_text(file_name: impl AsRef<Path>) -> Result<SourceText, ResourceError> {
    let file_name = file_name.as_ref();
    let text = TextBuffer::load(file_name)?.into_terminated();
    log::debug!("Loaded {} bytes from {}", text.len(), file_name.display());
    Ok(text)
}
