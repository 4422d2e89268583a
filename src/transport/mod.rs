//! Transport layer: wire-format details (serialization/deserialization).

mod balance;
mod error;
mod list;
mod send;
mod upload;

pub use balance::decode_balance_response;
pub use error::{ProviderFailure, decode_error_body};
pub use list::{decode_list_response, encode_list_query};
pub use send::{
    decode_detailed_send_response, decode_single_send_response, encode_send_batch_body,
    encode_send_one_body,
};
pub use upload::{decode_upload_response, encode_upload_body};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing required field: {field}")]
    MissingField { field: &'static str },
}
