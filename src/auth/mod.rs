//! Authentication: immutable credentials and the per-request signing scheme.
//!
//! Every outgoing call carries an `Authorization` header of the form
//!
//! ```text
//! HMAC-SHA256 apiKey=<key>, date=<RFC-3339 UTC>, salt=<nonce>, signature=<hex>
//! ```
//!
//! where `signature = HMAC-SHA256(key = secret, message = date || salt)`.
//! The header is recomputed fresh for every request; the salt prevents
//! signature replay across requests.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::client::MsgGateError;
use crate::domain::{ApiKey, SecretKey};

/// Scheme name in the rendered authorization header.
pub const AUTH_SCHEME: &str = "HMAC-SHA256";

const SALT_BYTES: usize = 16;

#[derive(Debug, Clone)]
/// API key / secret pair, immutable for the lifetime of a client.
///
/// The secret is redacted from `Debug` output and never serialized.
pub struct Credentials {
    api_key: ApiKey,
    secret_key: SecretKey,
}

impl Credentials {
    /// Validate and bind a key pair.
    ///
    /// Errors with [`MsgGateError::InvalidCredentials`] when either part is
    /// missing or blank.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, MsgGateError> {
        let api_key = ApiKey::new(api_key).map_err(|_| MsgGateError::InvalidCredentials {
            field: ApiKey::FIELD,
        })?;
        let secret_key =
            SecretKey::new(secret_key).map_err(|_| MsgGateError::InvalidCredentials {
                field: SecretKey::FIELD,
            })?;
        Ok(Self {
            api_key,
            secret_key,
        })
    }

    /// The public API key.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub(crate) fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A rendered authorization credential for one request.
///
/// Carries every field the provider needs to re-derive and verify the
/// signature server-side. Never reuse a header across requests; issue a
/// fresh one per call.
pub struct AuthHeader {
    api_key: ApiKey,
    date: String,
    salt: String,
    signature: String,
}

impl AuthHeader {
    /// Issue a header for the current wall-clock time with a fresh salt.
    pub fn issue(credentials: &Credentials) -> Self {
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        Self::compute(credentials, date, random_salt())
    }

    /// Compute a header from explicit `date` and `salt` values.
    ///
    /// Pure: a fixed `(api_key, secret, date, salt)` tuple always produces
    /// the same signature.
    pub fn compute(
        credentials: &Credentials,
        date: impl Into<String>,
        salt: impl Into<String>,
    ) -> Self {
        let date = date.into();
        let salt = salt.into();
        let signature = hmac_sha256_hex(credentials.secret_key(), &date, &salt);
        Self {
            api_key: credentials.api_key().clone(),
            date,
            salt,
            signature,
        }
    }

    /// RFC-3339 timestamp the signature was computed over.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Per-request nonce mixed into the signature input.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Hex-encoded HMAC-SHA256 signature.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl fmt::Display for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{AUTH_SCHEME} apiKey={}, date={}, salt={}, signature={}",
            self.api_key.as_str(),
            self.date,
            self.salt,
            self.signature
        )
    }
}

fn hmac_sha256_hex(secret: &SecretKey, date: &str, salt: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_str().as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(date.as_bytes());
    mac.update(salt.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn random_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
