use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(crate) struct ServerRequest {
    pub(crate) data_base64: Option<String>,
    pub(crate) data_mime: Option<String>,
    pub(crate) data_name: Option<String>,
    pub(crate) show_ocr: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ServerResponse {
    pub(crate) found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) reading: Option<ReadingPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ocr_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReadingPayload {
    pub(crate) width_mm: f64,
    pub(crate) height_mm: f64,
    pub(crate) width_cm: f64,
    pub(crate) height_cm: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: String,
}
