//! File-to-document loading.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::{Document, Result, SourceKind, TextRecognizer};
use crate::error::SourceError;

/// Loads receipt files as [`Document`]s.
#[derive(Clone, Default)]
pub struct DocumentLoader {
    recognizer: Option<Arc<dyn TextRecognizer>>,
}

impl DocumentLoader {
    /// Create a loader without image support.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `recognizer` for image files.
    pub fn with_recognizer(mut self, recognizer: impl TextRecognizer + 'static) -> Self {
        self.recognizer = Some(Arc::new(recognizer));
        self
    }

    /// Load a file, picking the strategy from its extension.
    pub fn load(&self, path: &Path) -> Result<Document> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let kind = SourceKind::from_path(path).ok_or_else(|| {
            SourceError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default()
                    .to_string(),
            )
        })?;

        let text = match kind {
            SourceKind::Text => read_text(path)?,
            SourceKind::Pdf => read_pdf(path)?,
            SourceKind::Image => match &self.recognizer {
                Some(recognizer) => recognizer.recognize(path)?,
                None => return Err(SourceError::RecognizerUnavailable(name)),
            },
        };

        debug!("Loaded {} characters from {} ({:?})", text.len(), name, kind);

        Ok(Document::new(name, text))
    }
}

impl std::fmt::Debug for DocumentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentLoader")
            .field("recognizer", &self.recognizer.is_some())
            .finish()
    }
}

fn io_error(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn read_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(text.trim().to_string())
}

#[cfg(feature = "pdf")]
fn read_pdf(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|e| io_error(path, e))?;
    pdf_extract::extract_text_from_mem(&data).map_err(|e| SourceError::Pdf(e.to_string()))
}

#[cfg(not(feature = "pdf"))]
fn read_pdf(_path: &Path) -> Result<String> {
    Err(SourceError::UnsupportedFormat("pdf".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct StaticRecognizer(&'static str);

    impl TextRecognizer for StaticRecognizer {
        fn recognize(&self, _path: &Path) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_text_trims() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bill.txt", b"\n  Amazon Rs 100  \n");

        let doc = DocumentLoader::new().load(&path).unwrap();
        assert_eq!(doc, Document::new("bill.txt", "Amazon Rs 100"));
    }

    #[test]
    fn test_load_image_without_recognizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "scan.png", b"not really a png");

        let err = DocumentLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, SourceError::RecognizerUnavailable(name) if name == "scan.png"));
    }

    #[test]
    fn test_load_image_with_recognizer() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "scan.JPG", b"");

        let loader = DocumentLoader::new().with_recognizer(StaticRecognizer("Tata Rs 5"));
        let doc = loader.load(&path).unwrap();
        assert_eq!(doc.text, "Tata Rs 5");
    }

    #[test]
    fn test_load_unsupported() {
        let err = DocumentLoader::new().load(Path::new("receipt.docx")).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat(ext) if ext == "docx"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DocumentLoader::new().load(Path::new("/nonexistent/receipt.txt")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
