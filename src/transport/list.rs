use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use super::TransportError;
use crate::domain::{ListMessagesFilter, MessageId, MessageListResult, MessageRecord};

pub fn encode_list_query(filter: &ListMessagesFilter) -> Vec<(String, String)> {
    let mut query = Vec::<(String, String)>::new();

    if let Some(message_id) = filter.message_id.as_ref() {
        query.push((MessageId::FIELD.to_owned(), message_id.as_str().to_owned()));
    }
    if let Some(group_id) = filter.group_id.as_ref() {
        query.push(("groupId".to_owned(), group_id.as_str().to_owned()));
    }
    if let Some(to) = filter.to.as_ref() {
        query.push(("to".to_owned(), to.raw().to_owned()));
    }
    if let Some(limit) = filter.limit {
        query.push(("limit".to_owned(), limit.to_string()));
    }
    if let Some(start_date) = filter.start_date {
        query.push(("startDate".to_owned(), render_date(start_date)));
    }
    if let Some(end_date) = filter.end_date {
        query.push(("endDate".to_owned(), render_date(end_date)));
    }

    query
}

fn render_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, Deserialize)]
struct ListJsonResponse {
    #[serde(rename = "messageList", default)]
    message_list: BTreeMap<String, MessageRecordJson>,
    #[serde(rename = "nextKey", default)]
    next_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageRecordJson {
    #[serde(default)]
    to: String,
    #[serde(default)]
    from: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(rename = "statusCode", default)]
    status_code: Option<String>,
    #[serde(rename = "dateReceived", default)]
    date_received: Option<DateTime<Utc>>,
}

pub fn decode_list_response(json: &str) -> Result<MessageListResult, TransportError> {
    let parsed: ListJsonResponse = serde_json::from_str(json)?;

    let messages = parsed
        .message_list
        .into_iter()
        .map(|(key, record)| {
            let id = MessageId::new(key).map_err(|_| TransportError::MissingField {
                field: MessageId::FIELD,
            })?;
            Ok((
                id,
                MessageRecord {
                    to: record.to,
                    from: record.from,
                    kind: record.kind,
                    text: record.text,
                    status_code: record.status_code,
                    date_received: record.date_received,
                },
            ))
        })
        .collect::<Result<BTreeMap<MessageId, MessageRecord>, TransportError>>()?;

    Ok(MessageListResult {
        messages,
        next_key: parsed.next_key,
    })
}
