use anyhow::{bail, Context, Result};
use std::process::Command;
use tracing::info;

/// Make sure the tesseract executable is reachable before reading images.
pub fn check_tesseract() -> Result<()> {
    let output = Command::new("tesseract")
        .arg("--version")
        .output()
        .context("tesseract is not installed. Install tesseract-ocr and try again.")?;
    if !output.status.success() {
        bail!("tesseract --version failed");
    }
    // Older releases print the version on stderr.
    let version = if output.stdout.is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        String::from_utf8_lossy(&output.stdout).into_owned()
    };
    info!("tesseract: {}", version.lines().next().unwrap_or("").trim());
    Ok(())
}
