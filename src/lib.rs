//! Typed Rust client for the MsgGate messaging dispatch HTTP API.
//!
//! The design is layered: a domain layer of strong types, a transport layer
//! for wire-format quirks, an auth layer computing the per-request
//! HMAC-SHA256 authorization header, and a small client layer orchestrating
//! requests. Partial batch failures come back as data on the successful
//! result; only a fully rejected batch is an error.
//!
//! ```rust,no_run
//! use msggate::{Credentials, Message, MessageText, MsgGateClient, RawPhoneNumber, SendRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), msggate::MsgGateError> {
//!     let client = MsgGateClient::new(Credentials::new("api-key", "api-secret")?);
//!     let msg = Message::new(
//!         RawPhoneNumber::new("+821012345678")?,
//!         RawPhoneNumber::new("+8223456789")?,
//!         MessageText::new("hello")?,
//!     );
//!     let result = client.send(SendRequest::new(vec![msg])?).await?;
//!     for rejected in &result.failed_messages {
//!         eprintln!("{}: {}", rejected.to, rejected.error_message);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod domain;
mod transport;

pub use auth::{AUTH_SCHEME, AuthHeader, Credentials};
pub use client::{
    ErrorCodeMap, MsgGateClient, MsgGateClientBuilder, MsgGateError, ProviderErrorKind,
};
pub use domain::{
    ApiKey, Balance, DetailedSendResult, FailedMessage, FileId, FileUploadKind, GroupCount,
    GroupId, GroupInfo, ListMessagesFilter, Message, MessageId, MessageListResult, MessageRecord,
    MessageText, MessageType, PhoneNumber, RawPhoneNumber, SEND_MAX_MESSAGES, SecretKey,
    SendOutcome, SendRequest, SingleSendResult, ValidationError, classify_send,
};
