mod tesseract;

use anyhow::{Context, Result};
use std::io::Write;

use crate::settings::Settings;

pub use tesseract::list_tesseract_languages;

/// Fixed engine configuration for one recognition pass.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub languages: String,
    pub oem: u32,
    pub psm: u32,
    pub dpi: u32,
}

impl OcrConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            languages: settings.ocr_languages.clone(),
            oem: settings.ocr_oem,
            psm: settings.ocr_psm,
            dpi: settings.ocr_dpi,
        }
    }
}

/// Run the OCR engine over an uploaded image and return the raw text.
///
/// The upload is decoded and normalized to RGB before the engine sees it;
/// tesseract reads a temporary PNG and writes plain text to stdout.
pub fn recognize_text(image_bytes: &[u8], config: &OcrConfig) -> Result<String> {
    let image =
        image::load_from_memory(image_bytes).with_context(|| "failed to decode image for OCR")?;
    let rgb = image::DynamicImage::ImageRgb8(image.to_rgb8());

    let mut tmp = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .with_context(|| "failed to create temp file for OCR")?;
    rgb.write_to(&mut tmp, image::ImageFormat::Png)
        .with_context(|| "failed to write temp image for OCR")?;
    tmp.flush().ok();

    let languages = tesseract::normalize_ocr_languages(&config.languages)?;
    let text = tesseract::run_tesseract_text(tmp.path(), &languages, config)?;
    tracing::debug!(chars = text.chars().count(), "ocr pass complete");
    Ok(text)
}
