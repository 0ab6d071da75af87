//! File system utilities.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::image_mime;

/// Writes content to a file atomically using a temp file and rename.
///
/// The temp file is created in the same directory as the target file so the
/// rename stays on one filesystem.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Saves image bytes under `dir`, named by their SHA-256 digest.
///
/// Saving the same image twice yields the same path.
pub fn save_image(dir: &Path, image: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create image directory: {}", dir.display()))?;

    let digest = hex::encode(Sha256::digest(image));
    let extension = if image_mime(image) == Some("image/png") {
        "png"
    } else {
        "jpg"
    };
    let path = dir.join(format!("{}.{extension}", &digest[..16]));

    atomic_write(&path, image)
        .with_context(|| format!("Failed to save image: {}", path.display()))?;

    Ok(path)
}
