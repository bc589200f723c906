//! Turning an uploaded notice into text
//!
//! Plain text files are read as-is, PDFs go through `pdf-extract` and images
//! are handed to a `tesseract` subprocess.

use crate::config::OcrConfig;
use pdf_extract::extract_text_from_mem;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("PDF contains no text layer; convert its pages to images for OCR")]
    ScannedPdf,

    #[error("Failed to run OCR engine {program}: {source}")]
    OcrSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("OCR timed out after {0} seconds")]
    OcrTimeout(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Pdf,
    Image,
}

impl SourceKind {
    /// Decide by file extension, case-insensitively
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "text" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            "png" | "jpg" | "jpeg" | "tif" | "tiff" | "bmp" | "gif" | "webp" => Ok(Self::Image),
            _ => Err(SourceError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

pub struct TextSource {
    ocr: OcrConfig,
}

impl TextSource {
    pub fn new(ocr: OcrConfig) -> Self {
        Self { ocr }
    }

    pub async fn read_text(&self, path: &Path) -> Result<String, SourceError> {
        let kind = SourceKind::from_path(path)?;
        tracing::debug!(path = %path.display(), ?kind, "reading notice");

        match kind {
            SourceKind::Text => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| io_error(path, source)),
            SourceKind::Pdf => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|source| io_error(path, source))?;
                pdf_text(&bytes)
            }
            SourceKind::Image => self.run_tesseract(path).await,
        }
    }

    async fn run_tesseract(&self, path: &Path) -> Result<String, SourceError> {
        if !path.is_file() {
            return Err(io_error(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            ));
        }

        let program = &self.ocr.tesseract_path;
        let child = Command::new(program)
            .arg(path)
            .arg("stdout")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SourceError::OcrSpawn {
                program: program.clone(),
                source,
            })?;

        let output = match timeout(
            Duration::from_secs(self.ocr.timeout_secs),
            child.wait_with_output(),
        )
        .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(SourceError::OcrFailed(e.to_string())),
            Err(_) => return Err(SourceError::OcrTimeout(self.ocr.timeout_secs)),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::OcrFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn pdf_text(bytes: &[u8]) -> Result<String, SourceError> {
    let text = extract_text_from_mem(bytes).map_err(|e| SourceError::Pdf(e.to_string()))?;

    // Image-only scans come back as whitespace
    if text.trim().is_empty() {
        return Err(SourceError::ScannedPdf);
    }
    Ok(text)
}
