//! Domain layer: strong types with validation and invariants (no I/O).

mod outcome;
mod request;
mod response;
mod validation;
mod value;

pub use outcome::{SendOutcome, classify_send};
pub use request::{ListMessagesFilter, Message, SEND_MAX_MESSAGES, SendRequest};
pub use response::{
    Balance, DetailedSendResult, FailedMessage, GroupCount, GroupInfo, MessageListResult,
    MessageRecord, SingleSendResult,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, FileId, FileUploadKind, GroupId, MessageId, MessageText, MessageType, PhoneNumber,
    RawPhoneNumber, SecretKey,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn secret_key_rejects_empty() {
        assert!(matches!(
            SecretKey::new(""),
            Err(ValidationError::Empty {
                field: SecretKey::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_parses_with_region_and_normalizes() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::KR), " 01012345678 ").unwrap();
        assert_eq!(pn.e164(), "+821012345678");
    }

    #[test]
    fn send_request_limit_is_enforced() {
        let msg = Message::new(
            RawPhoneNumber::new("+821012345678").unwrap(),
            RawPhoneNumber::new("+8223456789").unwrap(),
            MessageText::new("hi").unwrap(),
        );
        let messages = vec![msg; SEND_MAX_MESSAGES + 1];
        let err = SendRequest::new(messages).unwrap_err();
        assert!(matches!(err, ValidationError::TooManyMessages { .. }));
    }
}
