use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// A locally selected cover image, held in memory until it is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl CoverFile {
    /// Wrap bytes already in memory, checking the name maps to an image type.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let mime = image_mime(&file_name)
            .ok_or_else(|| Error::UnsupportedImage(file_name.clone()))?;
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    /// Read an image file from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidData(format!("not a file path: {}", path.display())))?
            .to_string();

        // Check the type before reading so large non-images are never loaded
        if image_mime(&file_name).is_none() {
            return Err(Error::UnsupportedImage(file_name));
        }

        let bytes = std::fs::read(path)?;
        log::debug!("Read cover image {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(file_name, bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keep image bytes out of debug output.
impl fmt::Debug for CoverFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverFile")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIME type for an image file name, or `None` if it is not an image.
pub fn image_mime(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("cover.JPG"), Some("image/jpeg"));
        assert_eq!(image_mime("a.b.png"), Some("image/png"));
        assert_eq!(image_mime("notes.txt"), None);
        assert_eq!(image_mime("README"), None);
    }

    #[test]
    fn test_from_bytes_rejects_non_image() {
        let err = CoverFile::from_bytes("book.pdf", vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImage(name) if name == "book.pdf"));
    }

    #[test]
    fn test_open_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("moby.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        let cover = CoverFile::open(&path).unwrap();
        assert_eq!(cover.file_name, "moby.png");
        assert_eq!(cover.mime, "image/png");
        assert_eq!(cover.len(), 4);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = CoverFile::open(&dir.path().join("gone.jpg")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_debug_omits_bytes() {
        let cover = CoverFile::from_bytes("x.gif", vec![0; 64]).unwrap();
        let debug = format!("{:?}", cover);
        assert!(debug.contains("len: 64"));
        assert!(!debug.contains("bytes"));
    }
}
