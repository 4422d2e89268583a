use chrono::{DateTime, Utc};

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    FileId, GroupId, MessageId, MessageText, MessageType, RawPhoneNumber,
};

/// Maximum number of messages accepted by the batch send endpoint.
pub const SEND_MAX_MESSAGES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One addressable message unit. Immutable once submitted.
///
/// Construct with [`Message::new`] and refine with the chainable setters:
///
/// ```
/// use msggate::{FileId, Message, MessageText, MessageType, RawPhoneNumber};
///
/// # fn demo() -> Result<(), msggate::ValidationError> {
/// let msg = Message::new(
///     RawPhoneNumber::new("+821012345678")?,
///     RawPhoneNumber::new("+8223456789")?,
///     MessageText::new("photo attached")?,
/// )
/// .kind(MessageType::Mms)
/// .subject("vacation")
/// .file_id(FileId::new("ST01FILE")?);
/// # let _ = msg;
/// # Ok(())
/// # }
/// ```
pub struct Message {
    to: RawPhoneNumber,
    from: RawPhoneNumber,
    text: MessageText,
    kind: MessageType,
    subject: Option<String>,
    file_ids: Vec<FileId>,
}

impl Message {
    /// Create an SMS message; switch channel with [`Message::kind`].
    pub fn new(to: RawPhoneNumber, from: RawPhoneNumber, text: MessageText) -> Self {
        Self {
            to,
            from,
            text,
            kind: MessageType::default(),
            subject: None,
            file_ids: Vec::new(),
        }
    }

    /// Set the message channel.
    pub fn kind(mut self, kind: MessageType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the subject line (LMS/MMS only; ignored by the provider for SMS).
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attach an uploaded file by its storage id.
    pub fn file_id(mut self, file_id: FileId) -> Self {
        self.file_ids.push(file_id);
        self
    }

    /// Recipient phone number.
    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    /// Sender phone number.
    pub fn from(&self) -> &RawPhoneNumber {
        &self.from
    }

    /// Message body text.
    pub fn text(&self) -> &MessageText {
        &self.text
    }

    /// Message channel.
    pub fn message_kind(&self) -> MessageType {
        self.kind
    }

    /// Subject line, if set.
    pub fn subject_line(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Attached storage file ids.
    pub fn file_ids(&self) -> &[FileId] {
        &self.file_ids
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Batch send request: a non-empty ordered sequence of messages plus an
/// optional scheduling timestamp.
///
/// Absent `scheduled_at` means "send immediately".
pub struct SendRequest {
    messages: Vec<Message>,
    scheduled_at: Option<DateTime<Utc>>,
}

impl SendRequest {
    /// Create an immediate send request.
    pub fn new(messages: Vec<Message>) -> Result<Self, ValidationError> {
        Self::build(messages, None)
    }

    /// Create a send request scheduled for a future point in time.
    pub fn scheduled(
        messages: Vec<Message>,
        at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::build(messages, Some(at))
    }

    fn build(
        messages: Vec<Message>,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        if messages.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        if messages.len() > SEND_MAX_MESSAGES {
            return Err(ValidationError::TooManyMessages {
                max: SEND_MAX_MESSAGES,
                actual: messages.len(),
            });
        }
        Ok(Self {
            messages,
            scheduled_at,
        })
    }

    /// The messages in submission order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Scheduling timestamp, if any.
    pub fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }
}

#[derive(Debug, Clone, Default)]
/// Filter for the message list endpoint. All fields optional.
pub struct ListMessagesFilter {
    pub message_id: Option<MessageId>,
    pub group_id: Option<GroupId>,
    pub to: Option<RawPhoneNumber>,
    pub limit: Option<u32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
