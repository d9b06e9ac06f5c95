//! Turning receipt files into text.
//!
//! Plain text is read directly and PDFs contribute their embedded text.
//! Images need a [`TextRecognizer`], which this crate does not provide.

mod loader;

pub use loader::DocumentLoader;

use std::path::Path;

use crate::error::SourceError;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Recognized text of one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Original file name, used to report outcomes.
    pub name: String,
    /// Recognized text, possibly empty.
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Kind of file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Plain UTF-8 text.
    Text,
    /// PDF document.
    Pdf,
    /// Raster image (needs text recognition).
    Image,
}

impl SourceKind {
    /// Classify a path by its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();

        match extension.as_str() {
            "txt" => Some(SourceKind::Text),
            "pdf" => Some(SourceKind::Pdf),
            "jpg" | "jpeg" | "png" => Some(SourceKind::Image),
            _ => None,
        }
    }
}

/// External text recognition for image files.
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text in an image file.
    fn recognize(&self, path: &Path) -> Result<String>;
}
