use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value::{GroupId, MessageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Per-batch counters reported by the provider.
///
/// Defaults to all-zero when the provider omits the block.
pub struct GroupCount {
    pub total: u32,
    pub registered_success: u32,
    pub registered_failed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Batch-level metadata reported by the provider.
pub struct GroupInfo {
    pub group_id: Option<GroupId>,
    pub count: GroupCount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One message the provider rejected, with the provider's reason.
pub struct FailedMessage {
    pub to: String,
    pub from: Option<String>,
    pub error_code: String,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Consolidated batch send response.
///
/// `failed_messages` lists the rejected subset; an accepted batch may still
/// carry a non-empty list (partial failure). `failed_messages.len()` never
/// exceeds `group_info.count.total` in a well-formed response.
pub struct DetailedSendResult {
    pub group_info: GroupInfo,
    pub failed_messages: Vec<FailedMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Response to a single-message send.
pub struct SingleSendResult {
    pub message_id: MessageId,
    pub group_id: Option<GroupId>,
    pub to: String,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One stored message returned by the list endpoint.
pub struct MessageRecord {
    pub to: String,
    pub from: Option<String>,
    pub kind: Option<String>,
    pub text: Option<String>,
    pub status_code: Option<String>,
    pub date_received: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Page of stored messages, keyed by message id.
pub struct MessageListResult {
    pub messages: BTreeMap<MessageId, MessageRecord>,
    pub next_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account balance.
///
/// Values are preserved as the provider's decimal tokens (`"10.00"` stays
/// `"10.00"` instead of becoming `"10.0"`).
pub struct Balance {
    pub balance: String,
    pub point: String,
}
