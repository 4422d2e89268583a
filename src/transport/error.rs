use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Machine-readable failure extracted from a non-2xx response.
pub struct ProviderFailure {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonBody {
    #[serde(rename = "errorCode")]
    error_code: String,
    #[serde(rename = "errorMessage", default)]
    error_message: String,
}

/// Decode a non-2xx response body into code + message.
///
/// When the body is not the documented `{errorCode, errorMessage}` shape,
/// the raw text becomes the message and the HTTP status stands in for the
/// code, so no provider failure is ever swallowed.
pub fn decode_error_body(status: u16, body: &str) -> ProviderFailure {
    match serde_json::from_str::<ErrorJsonBody>(body) {
        Ok(parsed) => ProviderFailure {
            code: parsed.error_code,
            message: parsed.error_message,
        },
        Err(_) => {
            let trimmed = body.trim();
            let message = if trimmed.is_empty() {
                format!("HTTP status {status} with empty body")
            } else {
                trimmed.to_owned()
            };
            ProviderFailure {
                code: format!("HTTP_{status}"),
                message,
            }
        }
    }
}
