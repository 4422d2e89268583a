use crate::domain::response::{DetailedSendResult, FailedMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Overall outcome of a batch send, derived from the provider's response.
pub enum SendOutcome {
    /// The provider accepted the batch. The result may still carry a
    /// non-empty `failed_messages` list when some (but not all) messages
    /// were rejected; inspect it to react to partial failures.
    Accepted(DetailedSendResult),
    /// Every submitted message was rejected.
    TotallyFailed(Vec<FailedMessage>),
}

/// Classify a batch send response.
///
/// The whole batch counts as failed only when the rejected list is non-empty
/// and its length equals `group_info.count.total`. Equality (not merely
/// "some message failed") is what separates "the whole batch bounced" from
/// "a batch of N had a few rejects": the latter comes back as
/// [`SendOutcome::Accepted`] with the rejects attached. A single-message
/// batch (`total == 1`) therefore surfaces its one rejection as
/// [`SendOutcome::TotallyFailed`].
pub fn classify_send(result: DetailedSendResult) -> SendOutcome {
    let total = result.group_info.count.total as usize;
    if !result.failed_messages.is_empty() && result.failed_messages.len() == total {
        return SendOutcome::TotallyFailed(result.failed_messages);
    }
    SendOutcome::Accepted(result)
}
