use axum::http::StatusCode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::{NOT_FOUND_MESSAGE, data, format_summary, mm_to_cm, ocr, scan_image};

use super::models::{ReadingPayload, ServerRequest, ServerResponse};
use super::state::ServerState;

pub(crate) struct ServerError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{:#}", err),
        }
    }
}

fn bad_request(message: impl Into<String>) -> ServerError {
    ServerError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

pub(crate) fn analyze_request(
    state: &ServerState,
    request: ServerRequest,
) -> Result<ServerResponse, ServerError> {
    let encoded = request
        .data_base64
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| bad_request("data_base64 is required"))?;
    let bytes = BASE64
        .decode(encoded)
        .map_err(|err| bad_request(format!("failed to decode data_base64: {}", err)))?;
    let image = data::load_image_from_bytes(
        bytes,
        request.data_mime.as_deref(),
        request.data_name.as_deref(),
    )
    .map_err(|err| bad_request(format!("{:#}", err)))?;

    let ocr_config = ocr::OcrConfig::from_settings(&state.settings);
    let outcome = scan_image(&image.bytes, &ocr_config)?;

    let ocr_text = request
        .show_ocr
        .unwrap_or(false)
        .then(|| outcome.ocr_text.clone());
    let response = match outcome.measurement {
        Some(measurement) => ServerResponse {
            found: true,
            summary: Some(format_summary(&measurement)),
            reading: Some(ReadingPayload {
                width_mm: measurement.width_mm,
                height_mm: measurement.height_mm,
                width_cm: mm_to_cm(measurement.width_mm),
                height_cm: mm_to_cm(measurement.height_mm),
            }),
            message: None,
            ocr_text,
        },
        None => ServerResponse {
            found: false,
            summary: None,
            reading: None,
            message: Some(NOT_FOUND_MESSAGE.to_string()),
            ocr_text,
        },
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn test_state() -> ServerState {
        ServerState {
            settings: Settings::default(),
        }
    }

    #[test]
    fn missing_payload_is_a_bad_request() {
        let err = analyze_request(&test_state(), ServerRequest::default()).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("data_base64"));
    }

    #[test]
    fn invalid_base64_is_a_bad_request() {
        let request = ServerRequest {
            data_base64: Some("not base64!!".to_string()),
            ..ServerRequest::default()
        };
        let err = analyze_request(&test_state(), request).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("data_base64"));
    }

    #[test]
    fn non_image_payload_is_a_bad_request() {
        let request = ServerRequest {
            data_base64: Some(BASE64.encode(b"plain text")),
            ..ServerRequest::default()
        };
        let err = analyze_request(&test_state(), request).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("unable to detect"));
    }
}
