//! Client layer: orchestrates signing, transport calls, and transport ↔ domain mapping.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::auth::{AuthHeader, Credentials};
use crate::domain::{
    Balance, DetailedSendResult, FailedMessage, FileId, FileUploadKind, ListMessagesFilter,
    Message, MessageListResult, SendOutcome, SendRequest, SingleSendResult, ValidationError,
    classify_send,
};
use crate::transport::{self, ProviderFailure};

const DEFAULT_BASE_URL: &str = "https://api.msggate.com";

const SEND_ONE_PATH: &str = "/messages/v4/send";
const SEND_BATCH_PATH: &str = "/messages/v4/send-many/detail";
const LIST_MESSAGES_PATH: &str = "/messages/v4/list";
const UPLOAD_FILE_PATH: &str = "/storage/v4/files";
const BALANCE_PATH: &str = "/cash/v4/balance";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: HttpMethod,
    url: String,
    authorization: String,
    body: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send_request<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send_request<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            builder = builder.header(reqwest::header::AUTHORIZATION, request.authorization);
            if let Some(body) = request.body.as_ref() {
                builder = builder.json(body);
            }
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MsgGateClient`].
///
/// This error preserves:
/// - HTTP-level failures (transport failures, unparseable bodies),
/// - provider-level failures (mapped error codes, total batch rejection),
/// - validation failures from the domain constructors.
///
/// Partial batch failure is not an error: it comes back inside an `Ok`
/// [`DetailedSendResult`] with a non-empty `failed_messages` list.
pub enum MsgGateError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Missing or empty api key / secret at client construction.
    #[error("invalid credentials: {field} is missing or empty")]
    InvalidCredentials { field: &'static str },

    /// The storage upload endpoint rejected the request.
    #[error("file upload failed: {code}: {message}")]
    FileUploadFailed { code: String, message: String },

    /// The provider rejected the request as invalid.
    #[error("bad request: {code}: {message}")]
    BadRequest { code: String, message: String },

    /// The provider rejected the request's authentication.
    #[error("invalid api key: {message}")]
    InvalidApiKey { message: String },

    /// Every message in a batch was rejected; the per-message reasons are attached.
    #[error("no message was accepted ({} rejected)", .failed.len())]
    MessageNotReceived { failed: Vec<FailedMessage> },

    /// The provider answered 2xx with a blank or `null` body.
    #[error("empty response body with HTTP status {status}")]
    EmptyResponse { status: u16 },

    /// Provider error code with no specific mapping, carried verbatim.
    #[error("provider error: {code}: {message}")]
    Provider { code: String, message: String },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Error kind a provider `errorCode` can be mapped to via [`ErrorCodeMap`].
pub enum ProviderErrorKind {
    /// Map to [`MsgGateError::BadRequest`].
    BadRequest,
    /// Map to [`MsgGateError::InvalidApiKey`].
    InvalidApiKey,
}

#[derive(Debug, Clone)]
/// Mapping from provider `errorCode` values to specific error kinds.
///
/// The provider's full code list is not documented, so the table is
/// extensible: register additional codes with [`ErrorCodeMap::insert`] or
/// [`MsgGateClientBuilder::map_error_code`]. Codes without an entry surface
/// as [`MsgGateError::Provider`] with code and message kept verbatim.
pub struct ErrorCodeMap {
    entries: HashMap<String, ProviderErrorKind>,
}

impl Default for ErrorCodeMap {
    fn default() -> Self {
        let mut map = Self {
            entries: HashMap::new(),
        };
        map.insert("ValidationError", ProviderErrorKind::BadRequest);
        map.insert("FailedToAddMessage", ProviderErrorKind::BadRequest);
        map.insert("InvalidApiKey", ProviderErrorKind::InvalidApiKey);
        map.insert("SignatureDoesNotMatch", ProviderErrorKind::InvalidApiKey);
        map
    }
}

impl ErrorCodeMap {
    /// Register (or override) the mapping for one provider code.
    pub fn insert(&mut self, code: impl Into<String>, kind: ProviderErrorKind) {
        self.entries.insert(code.into(), kind);
    }

    fn classify(&self, failure: ProviderFailure) -> MsgGateError {
        match self.entries.get(&failure.code) {
            Some(ProviderErrorKind::BadRequest) => MsgGateError::BadRequest {
                code: failure.code,
                message: failure.message,
            },
            Some(ProviderErrorKind::InvalidApiKey) => MsgGateError::InvalidApiKey {
                message: failure.message,
            },
            None => MsgGateError::Provider {
                code: failure.code,
                message: failure.message,
            },
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`MsgGateClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent,
/// or the provider error-code mapping.
pub struct MsgGateClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    error_codes: ErrorCodeMap,
}

impl MsgGateClientBuilder {
    /// Create a builder with the default base URL and no overrides.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            error_codes: ErrorCodeMap::default(),
        }
    }

    /// Override the MsgGate base URL (scheme + host); endpoint paths are
    /// appended to it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Register an additional provider `errorCode` → error kind mapping.
    pub fn map_error_code(mut self, code: impl Into<String>, kind: ProviderErrorKind) -> Self {
        self.error_codes.insert(code, kind);
        self
    }

    /// Build a [`MsgGateClient`].
    pub fn build(self) -> Result<MsgGateClient, MsgGateError> {
        let base_url = Url::parse(&self.base_url).map_err(|_| {
            MsgGateError::Validation(ValidationError::InvalidUrl {
                input: self.base_url.clone(),
            })
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| MsgGateError::Transport(Box::new(err)))?;

        Ok(MsgGateClient {
            credentials: self.credentials,
            base_url,
            error_codes: self.error_codes,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level MsgGate client.
///
/// This type orchestrates request signing, JSON encoding, and response
/// classification. Each call is one signed request/response cycle; a fresh
/// authorization header (new date + salt) is computed per call. The client
/// holds no mutable state, so clones share the underlying HTTP client and
/// can be used concurrently.
pub struct MsgGateClient {
    credentials: Credentials,
    base_url: Url,
    error_codes: ErrorCodeMap,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for MsgGateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MsgGateClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("error_codes", &self.error_codes)
            .field("http", &"<dyn HttpTransport>")
            .finish()
    }
}

impl MsgGateClient {
    /// Create a client against the production base URL.
    ///
    /// For more customization, use [`MsgGateClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            error_codes: ErrorCodeMap::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> MsgGateClientBuilder {
        MsgGateClientBuilder::new(credentials)
    }

    /// Send one message outside the batch protocol.
    ///
    /// This is binary: any rejection response is surfaced as a direct error
    /// with no accepted/partial distinction. Use [`MsgGateClient::send`]
    /// with a single message when you want the per-message failure reasons
    /// instead.
    pub async fn send_one(&self, message: Message) -> Result<SingleSendResult, MsgGateError> {
        let body = transport::encode_send_one_body(&message);
        let response = self
            .dispatch(HttpMethod::Post, SEND_ONE_PATH, Vec::new(), Some(body))
            .await?;
        let body = self.require_success(response)?;
        transport::decode_single_send_response(&body)
            .map_err(|err| MsgGateError::Parse(Box::new(err)))
    }

    /// Send a batch of messages, optionally scheduled.
    ///
    /// Always routed through the detailed batch endpoint, even for exactly
    /// one message. Partial failure (some messages rejected, the rest
    /// accepted) is returned as `Ok` with the rejects in
    /// [`DetailedSendResult::failed_messages`]; only a batch in which every
    /// message was rejected becomes [`MsgGateError::MessageNotReceived`].
    pub async fn send(&self, request: SendRequest) -> Result<DetailedSendResult, MsgGateError> {
        let body = transport::encode_send_batch_body(&request);
        let response = self
            .dispatch(HttpMethod::Post, SEND_BATCH_PATH, Vec::new(), Some(body))
            .await?;
        let body = self.require_success(response)?;
        let result = transport::decode_detailed_send_response(&body)
            .map_err(|err| MsgGateError::Parse(Box::new(err)))?;

        match classify_send(result) {
            SendOutcome::Accepted(result) => Ok(result),
            SendOutcome::TotallyFailed(failed) => {
                Err(MsgGateError::MessageNotReceived { failed })
            }
        }
    }

    /// Upload an attachment to MsgGate storage and get back its file id.
    ///
    /// The raw bytes are base64-encoded into the request body. Any non-2xx
    /// response maps to [`MsgGateError::FileUploadFailed`] carrying the
    /// provider's code and message.
    pub async fn upload_file(
        &self,
        content: &[u8],
        kind: FileUploadKind,
        link: Option<&Url>,
    ) -> Result<FileId, MsgGateError> {
        let body = transport::encode_upload_body(content, kind, link);
        let response = self
            .dispatch(HttpMethod::Post, UPLOAD_FILE_PATH, Vec::new(), Some(body))
            .await?;

        if !is_success(response.status) {
            let failure = transport::decode_error_body(response.status, &response.body);
            return Err(MsgGateError::FileUploadFailed {
                code: failure.code,
                message: failure.message,
            });
        }
        let body = non_empty_body(response)?;
        transport::decode_upload_response(&body).map_err(|err| MsgGateError::Parse(Box::new(err)))
    }

    /// List stored messages matching the filter.
    pub async fn list_messages(
        &self,
        filter: ListMessagesFilter,
    ) -> Result<MessageListResult, MsgGateError> {
        let query = transport::encode_list_query(&filter);
        let response = self
            .dispatch(HttpMethod::Get, LIST_MESSAGES_PATH, query, None)
            .await?;
        let body = self.require_success(response)?;
        transport::decode_list_response(&body).map_err(|err| MsgGateError::Parse(Box::new(err)))
    }

    /// Fetch the account balance.
    pub async fn balance(&self) -> Result<Balance, MsgGateError> {
        let response = self
            .dispatch(HttpMethod::Get, BALANCE_PATH, Vec::new(), None)
            .await?;
        let body = self.require_success(response)?;
        transport::decode_balance_response(&body)
            .map_err(|err| MsgGateError::Parse(Box::new(err)))
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, MsgGateError> {
        let mut url = self.base_url.clone();
        url.set_path(path);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        // Recomputed per call: the date and salt must be fresh.
        let auth = AuthHeader::issue(&self.credentials);
        tracing::debug!(method = ?method, url = %url, "dispatching signed request");

        self.http
            .send_request(HttpRequest {
                method,
                url: url.into(),
                authorization: auth.to_string(),
                body,
            })
            .await
            .map_err(MsgGateError::Transport)
    }

    fn require_success(&self, response: HttpResponse) -> Result<String, MsgGateError> {
        if !is_success(response.status) {
            tracing::warn!(status = response.status, "provider returned error status");
            let failure = transport::decode_error_body(response.status, &response.body);
            return Err(self.error_codes.classify(failure));
        }
        non_empty_body(response)
    }
}

fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

fn non_empty_body(response: HttpResponse) -> Result<String, MsgGateError> {
    let trimmed = response.body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(MsgGateError::EmptyResponse {
            status: response.status,
        });
    }
    Ok(response.body)
}
