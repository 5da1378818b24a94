use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::Utf8Error,
};

use super::ResourceError;

/// Capacity a fresh [`TextBuffer`] starts out with.
pub const DEFAULT_CAPACITY: usize = 256;

/// A byte buffer that grows by doubling while a text stream is read into it.
///
/// The buffer always keeps one byte of its capacity free so the terminator
/// appended by [`TextBuffer::into_terminated`] never needs to reallocate:
/// `len() <= capacity() - 1` holds after every operation. Capacity never shrinks.
#[derive(Debug)]
pub struct TextBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl TextBuffer {
    pub fn new() -> Result<Self, ResourceError> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer. Capacities below one byte are raised to one
    /// so the terminator slot exists even for empty input.
    pub fn with_capacity(capacity: usize) -> Result<Self, ResourceError> {
        let capacity = capacity.max(1);
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| ResourceError::Allocation {
                requested: capacity,
            })?;
        Ok(Self { data, capacity })
    }

    /// Appends one byte, doubling the capacity first when the byte would land
    /// in the reserved terminator slot.
    pub fn push(&mut self, byte: u8) -> Result<(), ResourceError> {
        if self.data.len() + 1 > self.capacity - 1 {
            self.grow()?;
        }
        self.data.push(byte);
        Ok(())
    }

    fn grow(&mut self) -> Result<(), ResourceError> {
        let requested = self
            .capacity
            .checked_mul(2)
            .ok_or(ResourceError::Allocation {
                requested: usize::MAX,
            })?;
        self.data
            .try_reserve_exact(requested - self.data.len())
            .map_err(|_| ResourceError::Allocation { requested })?;
        log::trace!("text buffer grown from {} to {} bytes", self.capacity, requested);
        self.capacity = requested;
        Ok(())
    }

    /// Reads `reader` to its end one byte at a time.
    pub fn read_from<R: Read>(reader: R) -> Result<Self, ResourceError> {
        let mut buffer = Self::new()?;
        for byte in BufReader::new(reader).bytes() {
            buffer.push(byte?)?;
        }
        Ok(buffer)
    }

    /// Opens `path` and reads the whole file into a fresh buffer.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| ResourceError::FileNotFound {
            path: path.to_path_buf(),
            error,
        })?;
        match Self::read_from(file) {
            Err(ResourceError::Io(error)) => Err(ResourceError::Read {
                path: path.to_path_buf(),
                error,
            }),
            result => result,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Appends the terminator and hands the bytes over. The length/capacity
    /// bookkeeping ends here.
    pub fn into_terminated(mut self) -> SourceText {
        // the reserved slot guarantees this push stays within the allocation
        self.data.push(0);
        SourceText { bytes: self.data }
    }
}

/// Text read from disk, owned as bytes that end in exactly one NUL terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    bytes: Vec<u8>,
}

impl SourceText {
    /// Content without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        let mut bytes = Vec::with_capacity(text.len() + 1);
        bytes.extend_from_slice(text.as_bytes());
        bytes.push(0);
        Self { bytes }
    }
}
