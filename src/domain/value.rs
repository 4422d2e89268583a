use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// MsgGate API key.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Header field name used in the authorization credential (`apiKey`).
    pub const FIELD: &'static str = "apiKey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// MsgGate API secret used as the HMAC signing key.
///
/// Invariant: must not be empty. The value is redacted from `Debug` output
/// and never serialized.
pub struct SecretKey(String);

impl SecretKey {
    /// Field name reported in validation errors (`secretKey`).
    pub const FIELD: &'static str = "secretKey";

    /// Create a validated [`SecretKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to MsgGate (`to` / `from`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you
/// want E.164 normalization, parse into [`PhoneNumber`] and convert it into
/// [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Message field name used by MsgGate (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to MsgGate.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        // Preserve E.164 normalization semantics for opt-in `PhoneNumber`.
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Message field name used by MsgGate (`to`).
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message body text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Message field name used by MsgGate (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// MsgGate message id (`messageId`) assigned by the provider.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Field name used by MsgGate (`messageId`).
    pub const FIELD: &'static str = "messageId";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// MsgGate group id (`groupId`) assigned to a batch by the provider.
///
/// Invariant: non-empty after trimming.
pub struct GroupId(String);

impl GroupId {
    /// Field name used by MsgGate (`groupId`).
    pub const FIELD: &'static str = "groupId";

    /// Create a validated [`GroupId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated group id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Storage file id (`fileId`) returned by the upload endpoint.
///
/// Invariant: non-empty after trimming.
pub struct FileId(String);

impl FileId {
    /// Field name used by MsgGate (`fileId`).
    pub const FIELD: &'static str = "fileId";

    /// Create a validated [`FileId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated file id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
/// Message channel (`type`).
pub enum MessageType {
    /// Short text message.
    #[default]
    Sms,
    /// Long text message.
    Lms,
    /// Multimedia message with attachments.
    Mms,
    /// Rich Communication Services message.
    Rcs,
}

impl MessageType {
    /// Wire representation used by MsgGate.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Lms => "LMS",
            Self::Mms => "MMS",
            Self::Rcs => "RCS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Attachment kind accepted by the storage upload endpoint (`type`).
pub enum FileUploadKind {
    /// Image attached to an MMS message.
    Mms,
    /// Media attached to an RCS message.
    Rcs,
    /// Document kept in storage and referenced by link.
    Document,
}

impl FileUploadKind {
    /// Wire representation used by MsgGate.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mms => "MMS",
            Self::Rcs => "RCS",
            Self::Document => "DOCUMENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let api_key = ApiKey::new("  key ").unwrap();
        assert_eq!(api_key.as_str(), "key");
        assert!(ApiKey::new("  ").is_err());

        let secret = SecretKey::new(" s3cr3t ").unwrap();
        assert_eq!(secret.as_str(), " s3cr3t ");
        assert!(SecretKey::new("   ").is_err());

        let text = MessageText::new(" hi ").unwrap();
        assert_eq!(text.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());

        let message_id = MessageId::new(" M4V20240101 ").unwrap();
        assert_eq!(message_id.as_str(), "M4V20240101");
        assert!(MessageId::new("  ").is_err());

        let group_id = GroupId::new(" G4V20240101 ").unwrap();
        assert_eq!(group_id.as_str(), "G4V20240101");
        assert!(GroupId::new("  ").is_err());

        let file_id = FileId::new(" ST01FILE ").unwrap();
        assert_eq!(file_id.as_str(), "ST01FILE");
        assert!(FileId::new("  ").is_err());
    }

    #[test]
    fn secret_key_debug_is_redacted() {
        let secret = SecretKey::new("hunter2").unwrap();
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("hunter2"));
        assert_eq!(rendered, "SecretKey(***)");
    }

    #[test]
    fn raw_phone_number_trims_and_exposes_raw() {
        let raw = RawPhoneNumber::new(" +821012345678 ").unwrap();
        assert_eq!(raw.raw(), "+821012345678");
        assert!(RawPhoneNumber::new("").is_err());
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+821012345678").unwrap();
        let p2 = PhoneNumber::parse(None, "+82 10-1234-5678").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+821012345678");
        assert_eq!(p1.raw(), "+821012345678");

        let raw: RawPhoneNumber = p1.clone().into();
        assert_eq!(raw.raw(), "+821012345678");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn wire_names_for_type_enums() {
        assert_eq!(MessageType::Sms.as_str(), "SMS");
        assert_eq!(MessageType::Mms.as_str(), "MMS");
        assert_eq!(MessageType::default(), MessageType::Sms);
        assert_eq!(FileUploadKind::Document.as_str(), "DOCUMENT");
    }
}
