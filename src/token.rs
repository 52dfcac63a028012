//! Tokenization boundary.
//!
//! Once the form is valid its values are posted to a tokenization endpoint,
//! which answers with a single-use token. The HTTP client itself is supplied by
//! the caller through the [`Transport`] trait; this module builds the request
//! body, folds every outcome (success, rejection, timeout, unsupported
//! environment, unreadable reply) into a [`TokenResponse`], and hands it to the
//! caller's callback exactly once.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use card_entry::token::{
//!     codes, HttpReply, TokenRequest, Tokenizer, TokenizerConfig, Transport, TransportError,
//! };
//!
//! struct Canned;
//!
//! impl Transport for Canned {
//!     fn post(&self, _: &str, _: &str, _: &str, _: Duration) -> Result<HttpReply, TransportError> {
//!         Ok(HttpReply::new(200, r#"{"code": 1, "message": "OK", "token": "tok_123"}"#))
//!     }
//! }
//!
//! let tokenizer = Tokenizer::new(TokenizerConfig::default(), Canned);
//! let request = TokenRequest::new("4242 4242 4242 4242", "123", "12", "2030");
//!
//! tokenizer.get_token(&request, |response| {
//!     assert!(response.success);
//!     assert_eq!(response.code, codes::SUCCESS);
//!     assert_eq!(response.token, "tok_123");
//! });
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Response codes carried by [`TokenResponse::code`].
pub mod codes {
    /// The endpoint issued a token.
    pub const SUCCESS: i64 = 1;
    /// The request timed out.
    pub const TIMEOUT: i64 = 0;
    /// The environment can only post cross-origin over HTTPS.
    pub const HTTPS_REQUIRED: i64 = 5;
    /// The environment cannot make the request at all.
    pub const UNSUPPORTED: i64 = 6;
    /// The endpoint answered with a body that is not a token response.
    pub const INVALID_RESPONSE: i64 = 7;
    /// The transport failed before a reply was received.
    pub const NETWORK_ERROR: i64 = 8;
    /// The request body could not be encoded.
    pub const ENCODING_ERROR: i64 = 9;
}

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default content type. `text/plain` keeps the cross-origin POST a simple
/// request for older mobile browsers.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Tokenizer settings.
///
/// Deserializes from e.g. `{"endpoint": "https://...", "timeout_ms": 5000}`;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Tokenization endpoint URL.
    pub endpoint: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Content type header sent with the request body.
    pub content_type: String,
}

impl TokenizerConfig {
    /// Creates a config for the given endpoint with default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Returns the request timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

/// Card data posted to the tokenization endpoint.
///
/// All fields are zeroed on drop and `Debug` never shows them.
#[derive(Clone, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct TokenRequest {
    /// Card number digits, no separators.
    pub number: String,
    /// Card verification digits.
    pub cvd: String,
    /// Two-digit expiry month (`MM`).
    pub expiry_month: String,
    /// Four-digit expiry year (`YYYY`).
    pub expiry_year: String,
}

impl TokenRequest {
    /// Creates a request; whitespace is stripped from the card number.
    pub fn new(
        number: &str,
        cvd: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
    ) -> Self {
        Self {
            number: number.chars().filter(|c| !c.is_whitespace()).collect(),
            cvd: cvd.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
        }
    }

    /// Encodes the request as the JSON body sent to the endpoint.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("number", &crate::mask::mask_number(&self.number))
            .field("cvd", &"***")
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .finish()
    }
}

/// Outcome of a tokenization attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TokenResponse {
    /// Response code, see [`codes`]. Non-2xx replies carry the HTTP status.
    pub code: i64,
    /// Message from the endpoint or describing the failure.
    pub message: String,
    /// The issued token, empty when none was returned.
    pub token: String,
    /// True only when `code` is [`codes::SUCCESS`].
    pub success: bool,
}

impl TokenResponse {
    /// A failed response with the given code and message.
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            ..Self::default()
        }
    }

    /// The request timed out.
    pub fn timeout() -> Self {
        Self::failure(codes::TIMEOUT, "Timeout")
    }

    /// The environment requires HTTPS for cross-origin posts.
    pub fn https_required() -> Self {
        Self::failure(
            codes::HTTPS_REQUIRED,
            "HTTPS connection required in Internet Explorer 9 and below",
        )
    }

    /// The environment cannot make the request.
    pub fn unsupported() -> Self {
        Self::failure(codes::UNSUPPORTED, "Unsupported browser")
    }
}

impl From<TransportError> for TokenResponse {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => Self::timeout(),
            TransportError::HttpsRequired => Self::https_required(),
            TransportError::Unsupported => Self::unsupported(),
            TransportError::Failed(message) => Self::failure(codes::NETWORK_ERROR, message),
        }
    }
}

/// Errors reading a tokenization reply body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// The body is not valid JSON or not an object.
    Malformed(String),
    /// The body has no `code` field.
    MissingCode,
    /// The `code` field is neither an integer nor an integer string.
    InvalidCode(String),
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(detail) => write!(f, "malformed token response: {}", detail),
            Self::MissingCode => write!(f, "token response has no code"),
            Self::InvalidCode(code) => write!(f, "token response code '{}' is not an integer", code),
        }
    }
}

impl std::error::Error for ResponseError {}

/// Errors raised by a [`Transport`] before a reply is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No reply within the configured timeout.
    Timeout,
    /// Cross-origin posts require an HTTPS page in this environment.
    HttpsRequired,
    /// No usable HTTP client in this environment.
    Unsupported,
    /// Any other transport failure.
    Failed(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "tokenization request timed out"),
            Self::HttpsRequired => write!(f, "HTTPS connection required"),
            Self::Unsupported => write!(f, "no supported HTTP transport"),
            Self::Failed(detail) => write!(f, "tokenization request failed: {}", detail),
        }
    }
}

impl std::error::Error for TransportError {}

/// A reply received by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpReply {
    /// Creates a reply.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// An HTTP client able to POST a body and wait for the reply.
pub trait Transport {
    /// Posts `body` to `url` and returns the reply, or an error if no reply
    /// arrived within `timeout`.
    fn post(
        &self,
        url: &str,
        content_type: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<HttpReply, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(
        &self,
        url: &str,
        content_type: &str,
        body: &str,
        timeout: Duration,
    ) -> Result<HttpReply, TransportError> {
        (**self).post(url, content_type, body, timeout)
    }
}

#[derive(Deserialize)]
struct RawResponse {
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

/// Parses a tokenization reply body.
///
/// The body is a JSON object with `code`, `message` and `token`. `code` may be
/// a number or a numeric string; the response is successful only when it
/// equals [`codes::SUCCESS`]. The token is passed through whatever the code.
///
/// # Example
///
/// ```
/// use card_entry::token::parse_response;
///
/// let response = parse_response(r#"{"code": "1", "message": "OK", "token": "abc"}"#).unwrap();
/// assert!(response.success);
///
/// let response = parse_response(r#"{"code": 3, "message": "Declined"}"#).unwrap();
/// assert!(!response.success);
/// assert_eq!(response.message, "Declined");
/// ```
pub fn parse_response(body: &str) -> Result<TokenResponse, ResponseError> {
    let raw: RawResponse =
        serde_json::from_str(body).map_err(|e| ResponseError::Malformed(e.to_string()))?;

    let code = match raw.code {
        None | Some(serde_json::Value::Null) => return Err(ResponseError::MissingCode),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| ResponseError::InvalidCode(n.to_string()))?,
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| ResponseError::InvalidCode(s.clone()))?,
        Some(other) => return Err(ResponseError::InvalidCode(other.to_string())),
    };

    Ok(TokenResponse {
        code,
        message: raw.message.unwrap_or_default(),
        token: raw.token.unwrap_or_default(),
        success: code == codes::SUCCESS,
    })
}

/// Posts token requests through a [`Transport`].
#[derive(Debug, Clone)]
pub struct Tokenizer<T> {
    config: TokenizerConfig,
    transport: T,
}

impl<T: Transport> Tokenizer<T> {
    /// Creates a tokenizer.
    pub fn new(config: TokenizerConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Posts the request and folds the outcome into a response.
    pub fn request_token(&self, request: &TokenRequest) -> TokenResponse {
        let mut body = match request.to_json() {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "failed to encode tokenization request");
                return TokenResponse::failure(codes::ENCODING_ERROR, err.to_string());
            }
        };

        debug!(
            endpoint = %self.config.endpoint,
            timeout_ms = self.config.timeout_ms,
            "dispatching tokenization request"
        );

        let outcome = self.transport.post(
            &self.config.endpoint,
            &self.config.content_type,
            &body,
            self.config.timeout(),
        );
        body.zeroize();

        match outcome {
            Ok(reply) if reply.is_success() => match parse_response(&reply.body) {
                Ok(response) => {
                    debug!(code = response.code, success = response.success, "tokenization response received");
                    response
                }
                Err(err) => {
                    warn!(error = %err, "invalid tokenization response");
                    TokenResponse::failure(codes::INVALID_RESPONSE, err.to_string())
                }
            },
            Ok(reply) => {
                warn!(status = reply.status, "tokenization endpoint returned an error status");
                TokenResponse::failure(i64::from(reply.status), format!("HTTP error {}", reply.status))
            }
            Err(TransportError::Timeout) => {
                warn!("tokenization request timed out");
                TokenResponse::timeout()
            }
            Err(err) => {
                warn!(error = %err, "tokenization request failed");
                err.into()
            }
        }
    }

    /// Posts the request and delivers the response to `callback`.
    ///
    /// The callback runs exactly once, on the calling thread, for every
    /// outcome including timeouts.
    pub fn get_token<F>(&self, request: &TokenRequest, callback: F)
    where
        F: FnOnce(TokenResponse),
    {
        callback(self.request_token(request));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct Scripted {
        outcome: Result<HttpReply, TransportError>,
        seen_body: RefCell<Option<String>>,
        seen_timeout: Cell<Option<Duration>>,
    }

    impl Scripted {
        fn new(outcome: Result<HttpReply, TransportError>) -> Self {
            Self {
                outcome,
                seen_body: RefCell::new(None),
                seen_timeout: Cell::new(None),
            }
        }
    }

    impl Transport for Scripted {
        fn post(
            &self,
            _url: &str,
            content_type: &str,
            body: &str,
            timeout: Duration,
        ) -> Result<HttpReply, TransportError> {
            assert_eq!(content_type, "text/plain");
            *self.seen_body.borrow_mut() = Some(body.to_string());
            self.seen_timeout.set(Some(timeout));
            self.outcome.clone()
        }
    }

    fn request() -> TokenRequest {
        TokenRequest::new("4242 4242 4242 4242", "123", "12", "2030")
    }

    fn deliver(transport: &Scripted) -> Vec<TokenResponse> {
        let tokenizer = Tokenizer::new(TokenizerConfig::new("https://example.test/tokens"), transport);
        let mut delivered = Vec::new();
        tokenizer.get_token(&request(), |response| delivered.push(response));
        delivered
    }

    #[test]
    fn test_request_body_shape() {
        let json: serde_json::Value = serde_json::from_str(&request().to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "number": "4242424242424242",
                "cvd": "123",
                "expiry_month": "12",
                "expiry_year": "2030"
            })
        );
    }

    #[test]
    fn test_request_debug_is_masked() {
        let debug = format!("{:?}", request());
        assert!(!debug.contains("4242424242424242"));
        assert!(!debug.contains("123\""));
        assert!(debug.contains("4242"));
    }

    #[test]
    fn test_success_delivered_once() {
        let transport = Scripted::new(Ok(HttpReply::new(
            200,
            r#"{"code": 1, "message": "Success", "token": "tok_abc"}"#,
        )));
        let delivered = deliver(&transport);
        assert_eq!(delivered.len(), 1);
        assert!(delivered[0].success);
        assert_eq!(delivered[0].token, "tok_abc");
        assert_eq!(transport.seen_timeout.get(), Some(Duration::from_secs(10)));
        assert!(transport
            .seen_body
            .borrow()
            .as_deref()
            .unwrap()
            .contains("\"number\":\"4242424242424242\""));
    }

    #[test]
    fn test_timeout_delivered_once() {
        let delivered = deliver(&Scripted::new(Err(TransportError::Timeout)));
        assert_eq!(delivered, vec![TokenResponse::timeout()]);
        assert_eq!(delivered[0].code, codes::TIMEOUT);
        assert_eq!(delivered[0].message, "Timeout");
        assert!(!delivered[0].success);
    }

    #[test]
    fn test_environment_errors() {
        let delivered = deliver(&Scripted::new(Err(TransportError::HttpsRequired)));
        assert_eq!(delivered[0].code, codes::HTTPS_REQUIRED);

        let delivered = deliver(&Scripted::new(Err(TransportError::Unsupported)));
        assert_eq!(delivered[0].code, codes::UNSUPPORTED);
        assert_eq!(delivered[0].message, "Unsupported browser");

        let delivered = deliver(&Scripted::new(Err(TransportError::Failed("reset".into()))));
        assert_eq!(delivered[0].code, codes::NETWORK_ERROR);
        assert_eq!(delivered[0].message, "reset");
    }

    #[test]
    fn test_error_status() {
        let delivered = deliver(&Scripted::new(Ok(HttpReply::new(502, "bad gateway"))));
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].code, 502);
        assert!(!delivered[0].success);
    }

    #[test]
    fn test_unreadable_body() {
        let delivered = deliver(&Scripted::new(Ok(HttpReply::new(200, "<html>"))));
        assert_eq!(delivered[0].code, codes::INVALID_RESPONSE);
        assert!(!delivered[0].success);
    }

    #[test]
    fn test_parse_response_codes() {
        let response = parse_response(r#"{"code": 1, "message": "ok", "token": "t"}"#).unwrap();
        assert_eq!(
            response,
            TokenResponse {
                code: 1,
                message: "ok".into(),
                token: "t".into(),
                success: true
            }
        );

        let response = parse_response(r#"{"code": "2", "message": "declined", "token": "t"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.code, 2);
        // Token passes through even on failure
        assert_eq!(response.token, "t");

        let response = parse_response(r#"{"code": 1}"#).unwrap();
        assert_eq!(response.message, "");
        assert_eq!(response.token, "");
    }

    #[test]
    fn test_parse_response_errors() {
        assert!(matches!(parse_response("nope"), Err(ResponseError::Malformed(_))));
        assert_eq!(parse_response(r#"{"message": "x"}"#), Err(ResponseError::MissingCode));
        assert_eq!(parse_response(r#"{"code": null}"#), Err(ResponseError::MissingCode));
        assert!(matches!(
            parse_response(r#"{"code": "one"}"#),
            Err(ResponseError::InvalidCode(_))
        ));
        assert!(matches!(
            parse_response(r#"{"code": 1.5}"#),
            Err(ResponseError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_config_defaults_and_deserialize() {
        let config = TokenizerConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.content_type, "text/plain");

        let config: TokenizerConfig =
            serde_json::from_str(r#"{"endpoint": "https://x.test", "timeout_ms": 2500}"#).unwrap();
        assert_eq!(config.endpoint, "https://x.test");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.content_type, "text/plain");
    }
}
