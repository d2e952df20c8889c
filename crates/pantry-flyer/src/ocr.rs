use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use image::ImageFormat;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, info};

use crate::preprocess;

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("tesseract is not installed or not on PATH")]
    MissingTesseract,

    #[error("tesseract exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Load `path`, clean it up for OCR and write the result to a temporary PNG.
/// The file is removed when the returned handle drops.
pub fn prepare_file(path: &Path) -> Result<NamedTempFile, OcrError> {
    let source = image::open(path).map_err(|source| OcrError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let cleaned = preprocess::prepare(&source);

    let tmp = tempfile::Builder::new()
        .prefix("pantry-flyer-")
        .suffix(".png")
        .tempfile()?;
    cleaned
        .save_with_format(tmp.path(), ImageFormat::Png)
        .map_err(|source| OcrError::Image {
            path: tmp.path().to_path_buf(),
            source,
        })?;
    debug!(
        "preprocessed {} -> {} ({}x{})",
        path.display(),
        tmp.path().display(),
        cleaned.width(),
        cleaned.height()
    );
    Ok(tmp)
}

/// Run tesseract over a preprocessed copy of `path` and return the text.
pub async fn recognize(path: &Path, lang: &str) -> Result<String, OcrError> {
    let prepared = prepare_file(path)?;

    let output = Command::new("tesseract")
        .arg(prepared.path())
        .arg("stdout")
        .args(["-l", lang])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => OcrError::MissingTesseract,
            _ => OcrError::Io(e),
        })?;

    if !output.status.success() {
        return Err(OcrError::Failed {
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    info!("read {} characters from {}", text.len(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn prepare_file_writes_binary_png() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("page.png");
        GrayImage::from_fn(30, 10, |x, _| Luma([if x < 15 { 20 } else { 230 }]))
            .save(&source)
            .unwrap();

        let prepared = prepare_file(&source).unwrap();
        assert_eq!(
            prepared.path().extension().and_then(|e| e.to_str()),
            Some("png")
        );
        let decoded = image::open(prepared.path()).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (30, 10));
        assert!(decoded.pixels().all(|Luma([v])| *v == 0 || *v == 255));
    }

    #[test]
    fn prepare_file_reports_unreadable_image() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("flyer.jpg");
        std::fs::write(&bogus, b"not an image").unwrap();

        let err = prepare_file(&bogus).unwrap_err();
        assert!(matches!(err, OcrError::Image { .. }));
        assert!(err.to_string().contains("flyer.jpg"));
    }

    #[tokio::test]
    async fn recognize_missing_file_fails_before_tesseract() {
        let err = recognize(Path::new("/nonexistent/flyer.png"), "eng")
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::Image { .. }));
    }
}
