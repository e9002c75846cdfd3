use anyhow::{Result, anyhow};
use std::path::Path;

pub mod data;
pub mod extract;
pub mod logging;
pub mod ocr;
pub mod round;
pub mod server;
pub mod settings;
mod test_util;

pub use extract::{Measurement, extract_measurements};
pub use round::{mm_to_cm, round_half_up};

/// User-facing guidance when the W/H fields cannot be found.
pub const NOT_FOUND_MESSAGE: &str =
    "W/H の数値を見つけられませんでした。別の画像で試すか、W/H周辺がはっきり写るスクショにしてください。";

#[derive(Debug, Clone)]
pub struct Config {
    pub data: Option<String>,
    pub data_mime: Option<String>,
    pub ocr_lang: Option<String>,
    pub show_ocr: bool,
    pub show_ocr_languages: bool,
    pub settings_path: Option<String>,
}

/// One recognition pass: the extracted measurement (when both fields were
/// found) plus the raw OCR text for the debug surface.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub measurement: Option<Measurement>,
    pub ocr_text: String,
}

/// OCR the image bytes and extract the W/H fields from the result.
pub fn scan_image(image_bytes: &[u8], config: &ocr::OcrConfig) -> Result<ScanOutcome> {
    let ocr_text = ocr::recognize_text(image_bytes, config)?;
    let measurement = extract::extract_measurements(&ocr_text);
    Ok(ScanOutcome {
        measurement,
        ocr_text,
    })
}

/// The two-line output surface: height first, one decimal digit each.
pub fn format_summary(measurement: &Measurement) -> String {
    format!(
        "タテ(H) 約 {:.1} cm\nヨコ(W) 約 {:.1} cm",
        mm_to_cm(measurement.height_mm),
        mm_to_cm(measurement.width_mm),
    )
}

pub fn run(config: Config, stdin_bytes: Option<Vec<u8>>) -> Result<String> {
    let settings_path = config.settings_path.as_deref().map(Path::new);
    let mut settings = settings::load_settings(settings_path)?;
    if let Some(lang) = config.ocr_lang.as_deref() {
        if !lang.trim().is_empty() {
            settings.ocr_languages = lang.trim().to_string();
        }
    }

    if config.show_ocr_languages {
        let langs = ocr::list_tesseract_languages()?;
        return Ok(langs.join("\n"));
    }

    let image = match (config.data.as_deref(), stdin_bytes) {
        (Some(path), _) => data::load_image(Path::new(path), config.data_mime.as_deref())?,
        (None, Some(bytes)) if !bytes.is_empty() => {
            data::load_image_from_bytes(bytes, config.data_mime.as_deref(), None)?
        }
        _ => {
            return Err(anyhow!(
                "no image supplied (use --data or pipe image bytes to stdin)"
            ));
        }
    };

    let ocr_config = ocr::OcrConfig::from_settings(&settings);
    let outcome = scan_image(&image.bytes, &ocr_config)?;

    let mut output = match outcome.measurement {
        Some(measurement) => format_summary(&measurement),
        None => NOT_FOUND_MESSAGE.to_string(),
    };
    if config.show_ocr {
        output.push_str("\n\nOCRテキスト:\n");
        output.push_str(outcome.ocr_text.trim_end());
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_two_lines_height_first() {
        let measurement = Measurement {
            width_mm: 150.0,
            height_mm: 200.0,
        };
        assert_eq!(
            format_summary(&measurement),
            "タテ(H) 約 20.0 cm\nヨコ(W) 約 15.0 cm"
        );
    }

    #[test]
    fn summary_rounds_half_up_to_one_decimal() {
        let measurement = Measurement {
            width_mm: 123.0,
            height_mm: 125.0,
        };
        assert_eq!(
            format_summary(&measurement),
            "タテ(H) 約 12.5 cm\nヨコ(W) 約 12.3 cm"
        );
    }
}
