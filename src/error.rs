//! Error types
//!
//! Every failure surfaced by the client is a [`WechatError`]. Business
//! failures reported by the platform inside an otherwise successful HTTP
//! exchange are carried by [`ApiError`], which keeps the response metadata
//! around for diagnosis.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::client::Response;

/// WeChat Open Platform SDK error types
#[derive(Debug, Error)]
pub enum WechatError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid request path {path:?}: {reason}")]
    InvalidUrl { path: String, reason: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("context must be non-nil")]
    MissingContext,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] Box<ApiError>),

    #[error("{response}: failed to decode response body: {source}")]
    Decode {
        response: Box<Response>,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures below the HTTP exchange: connection, TLS, timeouts and
/// cancellation of the caller's [`Context`](crate::Context).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("context canceled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl From<reqwest::Error> for WechatError {
    fn from(e: reqwest::Error) -> Self {
        WechatError::Transport(TransportError::Http(e))
    }
}

impl WechatError {
    /// The platform error code, if this is a business error.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            WechatError::Api(e) => Some(e.code),
            _ => None,
        }
    }

    /// Response metadata attached to the error, when the exchange completed.
    pub fn response(&self) -> Option<&Response> {
        match self {
            WechatError::Api(e) => Some(&e.response),
            WechatError::Decode { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }

    /// True when the caller's context was cancelled or its deadline passed.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            WechatError::Transport(TransportError::Cancelled)
                | WechatError::Transport(TransportError::DeadlineExceeded)
        )
    }
}

/// A non-zero `errcode` returned by the platform.
///
/// The platform reports business failures inside HTTP 200 responses, so
/// this error is raised regardless of the HTTP status.
#[derive(Debug, Error)]
#[error("{response}: errcode {code}: {message}")]
pub struct ApiError {
    /// Metadata of the response that carried the error.
    pub response: Response,
    /// `errcode` from the body.
    pub code: i64,
    /// `errmsg` from the body, empty when absent.
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: Option<String>,
}

/// Inspects a fully read body for the `{errcode, errmsg}` envelope.
///
/// Bodies that are empty or do not parse as the envelope are treated as
/// success; so is `errcode == 0`. Only a JSON object can be an envelope.
pub(crate) fn check_response(response: &Response, body: &[u8]) -> Result<(), WechatError> {
    let object = match serde_json::from_slice::<Map<String, Value>>(body) {
        Ok(object) => object,
        Err(_) => return Ok(()),
    };
    let envelope: ErrorEnvelope = match serde_json::from_value(Value::Object(object)) {
        Ok(envelope) => envelope,
        Err(_) => return Ok(()),
    };

    if envelope.errcode == 0 {
        return Ok(());
    }

    Err(Box::new(ApiError {
        response: response.clone(),
        code: envelope.errcode,
        message: envelope.errmsg.unwrap_or_default(),
    })
    .into())
}
