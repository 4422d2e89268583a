use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use url::Url;

use super::TransportError;
use crate::domain::{FileId, FileUploadKind};

pub fn encode_upload_body(content: &[u8], kind: FileUploadKind, link: Option<&Url>) -> Value {
    let mut body = Map::new();
    body.insert("file".to_owned(), json!(STANDARD.encode(content)));
    body.insert("type".to_owned(), json!(kind.as_str()));
    if let Some(link) = link {
        body.insert("link".to_owned(), json!(link.as_str()));
    }
    Value::Object(body)
}

#[derive(Debug, Clone, Deserialize)]
struct UploadJsonResponse {
    #[serde(rename = "fileId", default)]
    file_id: Option<String>,
}

pub fn decode_upload_response(json: &str) -> Result<FileId, TransportError> {
    let parsed: UploadJsonResponse = serde_json::from_str(json)?;
    parsed
        .file_id
        .and_then(|id| FileId::new(id).ok())
        .ok_or(TransportError::MissingField {
            field: FileId::FIELD,
        })
}
