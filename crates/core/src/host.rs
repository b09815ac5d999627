//! Contracts fulfilled by the host 3D application.
//!
//! The plugin runs inside a host modeler whose scripting bridge is an
//! opaque collaborator. Only two narrow capabilities are needed here:
//! capturing the active viewport to an image file, and hiding/restoring
//! UI chrome around a capture. Implementations live with the host
//! integration, not in this workspace.

use std::path::{Path, PathBuf};

/// Captures the host's active viewport to an image file.
pub trait ViewportCapture {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Write the current viewport to `path` and return the path of the
    /// written file (hosts may adjust the extension).
    fn capture_to(&self, path: &Path) -> Result<PathBuf, Self::Error>;
}

/// Hides and restores host UI chrome around a capture.
///
/// Best-effort on both sides; a failed restore should be logged by the
/// implementation, never propagated into the capture flow.
pub trait UiChrome {
    fn hide(&self);
    fn restore(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FileCopyCapture {
        source: PathBuf,
    }

    impl ViewportCapture for FileCopyCapture {
        type Error = std::io::Error;

        fn capture_to(&self, path: &Path) -> Result<PathBuf, Self::Error> {
            std::fs::copy(&self.source, path)?;
            Ok(path.to_path_buf())
        }
    }

    struct CountingChrome {
        hidden: Cell<bool>,
    }

    impl UiChrome for CountingChrome {
        fn hide(&self) {
            self.hidden.set(true);
        }

        fn restore(&self) {
            self.hidden.set(false);
        }
    }

    #[test]
    fn capture_writes_the_requested_path() {
        let dir = std::env::temp_dir();
        let source = dir.join(format!("stylepanel-host-src-{}", std::process::id()));
        let target = dir.join(format!("stylepanel-host-dst-{}", std::process::id()));
        std::fs::write(&source, b"fake image bytes").unwrap();

        let capture = FileCopyCapture {
            source: source.clone(),
        };
        let written = capture.capture_to(&target).unwrap();
        assert_eq!(written, target);
        assert_eq!(std::fs::read(&written).unwrap(), b"fake image bytes");

        std::fs::remove_file(&source).ok();
        std::fs::remove_file(&target).ok();
    }

    #[test]
    fn chrome_hide_and_restore_bracket_a_capture() {
        let chrome = CountingChrome {
            hidden: Cell::new(false),
        };
        chrome.hide();
        assert!(chrome.hidden.get());
        chrome.restore();
        assert!(!chrome.hidden.get());
    }
}
