use chrono::SecondsFormat;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::TransportError;
use crate::domain::{
    DetailedSendResult, FailedMessage, FileId, GroupCount, GroupId, GroupInfo, Message, MessageId,
    SendRequest, SingleSendResult,
};

pub fn encode_send_one_body(message: &Message) -> Value {
    json!({ "message": message_json(message) })
}

pub fn encode_send_batch_body(request: &SendRequest) -> Value {
    let mut body = Map::new();
    body.insert(
        "messages".to_owned(),
        Value::Array(request.messages().iter().map(message_json).collect()),
    );
    // Absent scheduledDate means "send immediately".
    if let Some(at) = request.scheduled_at() {
        body.insert(
            "scheduledDate".to_owned(),
            json!(at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
    }
    Value::Object(body)
}

fn message_json(message: &Message) -> Value {
    let mut obj = Map::new();
    obj.insert("to".to_owned(), json!(message.to().raw()));
    obj.insert("from".to_owned(), json!(message.from().raw()));
    obj.insert("text".to_owned(), json!(message.text().as_str()));
    obj.insert("type".to_owned(), json!(message.message_kind().as_str()));
    if let Some(subject) = message.subject_line() {
        obj.insert("subject".to_owned(), json!(subject));
    }
    if !message.file_ids().is_empty() {
        let ids = message
            .file_ids()
            .iter()
            .map(FileId::as_str)
            .collect::<Vec<_>>();
        obj.insert("fileIds".to_owned(), json!(ids));
    }
    Value::Object(obj)
}

#[derive(Debug, Clone, Deserialize)]
struct DetailedSendJsonResponse {
    #[serde(rename = "groupInfo", default)]
    group_info: Option<GroupInfoJson>,
    #[serde(rename = "failedMessageList", default)]
    failed_message_list: Vec<FailedMessageJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct GroupInfoJson {
    #[serde(rename = "groupId", default)]
    group_id: Option<String>,
    #[serde(default)]
    count: CountJson,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CountJson {
    #[serde(default)]
    total: u32,
    #[serde(rename = "registeredSuccess", default)]
    registered_success: u32,
    #[serde(rename = "registeredFailed", default)]
    registered_failed: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct FailedMessageJson {
    #[serde(default)]
    to: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(rename = "errorCode", default)]
    error_code: String,
    #[serde(rename = "errorMessage", default)]
    error_message: String,
}

pub fn decode_detailed_send_response(json: &str) -> Result<DetailedSendResult, TransportError> {
    let parsed: DetailedSendJsonResponse = serde_json::from_str(json)?;

    let group_info = match parsed.group_info {
        Some(info) => GroupInfo {
            group_id: info.group_id.and_then(|id| GroupId::new(id).ok()),
            count: GroupCount {
                total: info.count.total,
                registered_success: info.count.registered_success,
                registered_failed: info.count.registered_failed,
            },
        },
        None => GroupInfo::default(),
    };

    let failed_messages = parsed
        .failed_message_list
        .into_iter()
        .map(|failed| FailedMessage {
            to: failed.to,
            from: failed.from,
            error_code: failed.error_code,
            error_message: failed.error_message,
        })
        .collect();

    Ok(DetailedSendResult {
        group_info,
        failed_messages,
    })
}

#[derive(Debug, Clone, Deserialize)]
struct SingleSendJsonResponse {
    #[serde(rename = "messageId", default)]
    message_id: Option<String>,
    #[serde(rename = "groupId", default)]
    group_id: Option<String>,
    #[serde(default)]
    to: String,
    #[serde(rename = "statusCode", default)]
    status_code: Option<String>,
    #[serde(rename = "statusMessage", default)]
    status_message: Option<String>,
}

pub fn decode_single_send_response(json: &str) -> Result<SingleSendResult, TransportError> {
    let parsed: SingleSendJsonResponse = serde_json::from_str(json)?;

    let message_id = parsed
        .message_id
        .and_then(|id| MessageId::new(id).ok())
        .ok_or(TransportError::MissingField {
            field: MessageId::FIELD,
        })?;

    Ok(SingleSendResult {
        message_id,
        group_id: parsed.group_id.and_then(|id| GroupId::new(id).ok()),
        to: parsed.to,
        status_code: parsed.status_code,
        status_message: parsed.status_message,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use crate::domain::{MessageText, MessageType, RawPhoneNumber};

    use super::*;

    fn message() -> Message {
        Message::new(
            RawPhoneNumber::new("+821012345678").unwrap(),
            RawPhoneNumber::new("+8223456789").unwrap(),
            MessageText::new("hello").unwrap(),
        )
    }

    #[test]
    fn encode_one_wraps_message_object() {
        let body = encode_send_one_body(&message());
        assert_eq!(body["message"]["to"], "+821012345678");
        assert_eq!(body["message"]["from"], "+8223456789");
        assert_eq!(body["message"]["text"], "hello");
        assert_eq!(body["message"]["type"], "SMS");
        assert!(body["message"].get("subject").is_none());
        assert!(body["message"].get("fileIds").is_none());
    }

    #[test]
    fn encode_message_with_subject_and_files() {
        let msg = message()
            .kind(MessageType::Mms)
            .subject("pics")
            .file_id(FileId::new("ST01A").unwrap());
        let body = encode_send_one_body(&msg);
        assert_eq!(body["message"]["type"], "MMS");
        assert_eq!(body["message"]["subject"], "pics");
        assert_eq!(body["message"]["fileIds"], json!(["ST01A"]));
    }

    #[test]
    fn encode_batch_omits_scheduled_date_for_immediate_send() {
        let request = SendRequest::new(vec![message(), message()]).unwrap();
        let body = encode_send_batch_body(&request);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert!(body.get("scheduledDate").is_none());
    }

    #[test]
    fn encode_batch_renders_scheduled_date_as_rfc3339_utc() {
        let at = Utc.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap();
        let request = SendRequest::scheduled(vec![message()], at).unwrap();
        let body = encode_send_batch_body(&request);
        assert_eq!(body["scheduledDate"], "2025-07-01T09:30:00Z");
    }

    #[test]
    fn decode_detailed_response_with_full_group_info() {
        let json = r#"
        {
          "groupInfo": {
            "groupId": "G4V20250701",
            "count": { "total": 3, "registeredSuccess": 2, "registeredFailed": 1 }
          },
          "failedMessageList": [
            {
              "to": "+821012340000",
              "from": "+8223456789",
              "errorCode": "FailedToAddMessage",
              "errorMessage": "carrier rejected"
            }
          ]
        }
        "#;

        let result = decode_detailed_send_response(json).unwrap();
        assert_eq!(
            result.group_info.group_id,
            Some(GroupId::new("G4V20250701").unwrap())
        );
        assert_eq!(result.group_info.count.total, 3);
        assert_eq!(result.group_info.count.registered_success, 2);
        assert_eq!(result.group_info.count.registered_failed, 1);
        assert_eq!(result.failed_messages.len(), 1);
        assert_eq!(result.failed_messages[0].error_code, "FailedToAddMessage");
        assert_eq!(result.failed_messages[0].error_message, "carrier rejected");
    }

    #[test]
    fn decode_detailed_response_defaults_missing_blocks() {
        let result = decode_detailed_send_response("{}").unwrap();
        assert_eq!(result.group_info, GroupInfo::default());
        assert_eq!(result.group_info.count.total, 0);
        assert!(result.failed_messages.is_empty());
    }

    #[test]
    fn decode_single_response_requires_message_id() {
        let json = r#"
        {
          "messageId": "M4V20250701",
          "groupId": "G4V20250701",
          "to": "+821012345678",
          "statusCode": "2000",
          "statusMessage": "accepted"
        }
        "#;
        let result = decode_single_send_response(json).unwrap();
        assert_eq!(result.message_id, MessageId::new("M4V20250701").unwrap());
        assert_eq!(result.status_code.as_deref(), Some("2000"));

        let err = decode_single_send_response(r#"{"to": "+821012345678"}"#).unwrap_err();
        assert!(matches!(
            err,
            TransportError::MissingField {
                field: MessageId::FIELD
            }
        ));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(
            decode_detailed_send_response("{ not json }"),
            Err(TransportError::Json(_))
        ));
    }
}
