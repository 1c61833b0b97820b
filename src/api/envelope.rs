use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

/// Success wire format: `{statusCode, data, message?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status_code: u16,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failure wire format: `{statusCode, error, message}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

pub type Enveloped<T> = (StatusCode, Json<Envelope<T>>);

pub fn envelope<T: Serialize>(status: StatusCode, data: T) -> Enveloped<T> {
    (
        status,
        Json(Envelope {
            status_code: status.as_u16(),
            data,
            message: None,
        }),
    )
}

pub fn envelope_with_message<T: Serialize>(
    status: StatusCode,
    data: T,
    message: impl Into<String>,
) -> Enveloped<T> {
    let (status, Json(mut body)) = envelope(status, data);
    body.message = Some(message.into());
    (status, Json(body))
}

pub fn error_envelope(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorEnvelope>) {
    (
        status,
        Json(ErrorEnvelope {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
        }),
    )
}
