use std::fs;
use std::io;
use std::path::Path;

/// One operator-selected photo, held as an opaque binary payload.
///
/// The bytes are never decoded client-side; they are owned by a single
/// detect request and dropped once that request resolves.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    file_name: String,
    bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Load an asset from disk, keeping the file name for the upload form.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
