//! File-based stand-in for the host viewport capture.
//!
//! Inside the host application the capture comes from its scripting
//! bridge; on the command line the "viewport" is simply an image file
//! that gets staged into place.

use std::path::{Path, PathBuf};

use stylepanel_core::host::ViewportCapture;

/// Captures by copying a source image to the requested path.
pub struct FileCapture {
    source: PathBuf,
}

impl FileCapture {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl ViewportCapture for FileCapture {
    type Error = std::io::Error;

    fn capture_to(&self, path: &Path) -> Result<PathBuf, Self::Error> {
        std::fs::copy(&self.source, path)?;
        Ok(path.to_path_buf())
    }
}
