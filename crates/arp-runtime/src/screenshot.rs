//! Saving captured frames
//!
//! Pixel capture itself is done by the platform; this module only names and
//! writes the PNG bytes it hands over.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Screenshot errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    #[error("Captured image is empty")]
    EmptyImage,
    #[error("IO error: {0}")]
    Io(String),
}

/// `ARScreenshot_yyyyMMdd_HHmmss.png`
pub fn screenshot_file_name(taken_at: DateTime<Local>) -> String {
    format!("ARScreenshot_{}.png", taken_at.format("%Y%m%d_%H%M%S"))
}

/// Write `png` into `directory`, creating it if needed
pub fn save_screenshot(
    directory: &Path,
    png: &[u8],
    taken_at: DateTime<Local>,
) -> Result<PathBuf, CaptureError> {
    if png.is_empty() {
        return Err(CaptureError::EmptyImage);
    }

    std::fs::create_dir_all(directory).map_err(|e| CaptureError::Io(e.to_string()))?;
    let path = directory.join(screenshot_file_name(taken_at));
    std::fs::write(&path, png).map_err(|e| CaptureError::Io(e.to_string()))?;
    Ok(path)
}
