use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Largest attachment accepted for a concierge turn.
pub const MAX_IMAGE_SIZE: usize = 8 * 1024 * 1024; // 8MB

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Detects the MIME type of JPEG and PNG images from their leading bytes.
pub fn image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(PNG_MAGIC) {
        Some("image/png")
    } else if bytes.starts_with(JPEG_MAGIC) {
        Some("image/jpeg")
    } else {
        None
    }
}

/// Reads an image attachment from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read, exceeds [`MAX_IMAGE_SIZE`],
/// or is neither a JPEG nor a PNG.
pub fn read_image(path: &Path) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to access file: {}", path.display()))?;

    let size = metadata.len() as usize;
    if size > MAX_IMAGE_SIZE {
        bail!(
            "Image size ({:.1} MB) exceeds maximum allowed size (8 MB).",
            size as f64 / 1024.0 / 1024.0
        );
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    if image_mime(&bytes).is_none() {
        bail!("Unsupported image format: {} (expected JPEG or PNG)", path.display());
    }

    Ok(bytes)
}
