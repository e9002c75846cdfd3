use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};

pub const PNG_MIME: &str = "image/png";
pub const JPEG_MIME: &str = "image/jpeg";
pub const WEBP_MIME: &str = "image/webp";
pub const BMP_MIME: &str = "image/bmp";

/// One uploaded screenshot, decoded mime included.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub name: Option<String>,
}

pub fn load_image(path: &Path, mime_hint: Option<&str>) -> Result<ImageData> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image file: {}", path.display()))?;
    let mime = resolve_mime(mime_hint.unwrap_or("auto"), &bytes, Some(path))?;
    let name = path
        .file_name()
        .and_then(|value| value.to_str())
        .map(|value| value.to_string());
    Ok(ImageData { bytes, mime, name })
}

pub fn load_image_from_bytes(
    bytes: Vec<u8>,
    mime_hint: Option<&str>,
    name: Option<&str>,
) -> Result<ImageData> {
    let path = name.map(PathBuf::from);
    let mime = resolve_mime(mime_hint.unwrap_or("auto"), &bytes, path.as_deref())?;
    Ok(ImageData {
        bytes,
        mime,
        name: name.map(|value| value.to_string()),
    })
}

pub fn is_supported_image(mime: &str) -> bool {
    matches!(mime, PNG_MIME | JPEG_MIME | WEBP_MIME | BMP_MIME)
}

fn resolve_mime(input: &str, bytes: &[u8], path: Option<&Path>) -> Result<String> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(anyhow!("data-mime is empty"));
    }
    let lower = raw.to_lowercase();

    let mime = match lower.as_str() {
        "auto" | "image" | "image/*" => detect_mime(bytes, path)?,
        "png" => PNG_MIME.to_string(),
        "jpg" | "jpeg" | "image/jpg" => JPEG_MIME.to_string(),
        "webp" => WEBP_MIME.to_string(),
        "bmp" => BMP_MIME.to_string(),
        _ if lower.starts_with("image/") => lower,
        _ => {
            return Err(anyhow!(
                "unsupported --data-mime '{}' (expected auto, image/*, png, jpg, webp, bmp)",
                raw
            ));
        }
    };

    if !is_supported_image(&mime) {
        return Err(anyhow!(
            "unsupported image format '{}' (expected PNG, JPEG, WEBP, BMP)",
            mime
        ));
    }
    Ok(mime)
}

fn detect_mime(bytes: &[u8], path: Option<&Path>) -> Result<String> {
    if let Some(detected) = sniff_image_mime(bytes) {
        return Ok(detected.to_string());
    }

    if let Some(ext) = extension_lower(path) {
        if let Some(mime) = mime_from_extension(&ext) {
            return Ok(mime.to_string());
        }
    }

    Err(anyhow!(
        "unable to detect a supported image format for '{}'",
        path.map(|value| value.display().to_string())
            .unwrap_or_else(|| "upload".to_string())
    ))
}

fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    let kind = infer::get(bytes)?;
    match kind.mime_type() {
        "image/png" => Some(PNG_MIME),
        "image/jpeg" | "image/jpg" => Some(JPEG_MIME),
        "image/webp" => Some(WEBP_MIME),
        "image/bmp" => Some(BMP_MIME),
        _ => None,
    }
}

fn extension_lower(path: Option<&Path>) -> Option<String> {
    path.and_then(|path| path.extension())
        .and_then(|value| value.to_str())
        .map(|value| value.to_lowercase())
}

fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "png" => Some(PNG_MIME),
        "jpg" | "jpeg" => Some(JPEG_MIME),
        "webp" => Some(WEBP_MIME),
        "bmp" => Some(BMP_MIME),
        _ => None,
    }
}
