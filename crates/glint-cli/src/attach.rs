//! Local image attachment: path normalization + MIME helpers.
//!
//! Attachment stops at reading bytes and naming their MIME type; there is
//! no decode or resize pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glint_core::chat::ImageData;

/// Reads a user-supplied image path into an attachable payload.
///
/// # Errors
/// Returns an error for an empty path, an unsupported extension, or an
/// unreadable file.
pub fn load_image(path: &str) -> Result<ImageData> {
    if path.is_empty() {
        bail!("usage: /image <path>");
    }

    let Some(mime_type) = mime_type_for_extension(path) else {
        bail!("Unsupported image type: {path} (expected png, jpg, gif, or webp)");
    };

    let normalized = normalize_input_path(path);
    let data = std::fs::read(&normalized)
        .with_context(|| format!("Failed to read image {}", normalized.display()))?;

    Ok(ImageData {
        mime_type: mime_type.to_string(),
        data,
    })
}

/// Normalizes user-provided file paths.
///
/// Handles common drag-and-drop shell escaping (`\ `, `\(`, `\)`) and
/// expands `~/` to the HOME directory when available.
fn normalize_input_path(path: &str) -> PathBuf {
    normalize_input_path_with_home(path, std::env::var("HOME").ok().as_deref())
}

fn normalize_input_path_with_home(path: &str, home: Option<&str>) -> PathBuf {
    let unescaped = path
        .replace("\\ ", " ")
        .replace("\\(", "(")
        .replace("\\)", ")");

    let path = Path::new(&unescaped);
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/"))
        && let Some(home) = home
    {
        return PathBuf::from(home).join(rest);
    }

    path.to_path_buf()
}

/// Returns MIME type inferred from file extension for supported image formats.
fn mime_type_for_extension(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension().and_then(|e| e.to_str())?;

    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
