//! Response metadata and body handling
//!
//! A completed exchange is consumed in exactly one of two ways:
//!
//! - fully read and (optionally) decoded, yielding a [`Response<T>`];
//! - handed back undecoded as a [`StreamResponse`] for binary endpoints, in
//!   which case the caller owns the open body.

use std::fmt;
use std::ops::Deref;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, StatusCode};
use reqwest::Url;

use crate::error::WechatError;
use crate::utils::redact_url;

/// HTTP metadata of a completed exchange, plus the decoded body.
///
/// `Response<()>` (the default) carries metadata only and is what no-content
/// endpoints and errors expose. The decoded body is reachable through
/// [`Deref`], [`body`](Self::body) or [`into_body`](Self::into_body).
#[derive(Clone)]
pub struct Response<T = ()> {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: T,
}

impl Response {
    pub(crate) fn new(method: Method, url: Url, status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            method,
            url,
            status,
            headers,
            body: (),
        }
    }

    pub(crate) fn from_raw(method: Method, raw: &reqwest::Response) -> Self {
        Self::new(
            method,
            raw.url().clone(),
            raw.status(),
            raw.headers().clone(),
        )
    }

    pub(crate) fn with_body<T>(self, body: T) -> Response<T> {
        Response {
            method: self.method,
            url: self.url,
            status: self.status,
            headers: self.headers,
            body,
        }
    }
}

impl<T> Response<T> {
    /// Method of the request that produced this response.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Final URL of the exchange. May contain the access token.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_body(self) -> T {
        self.body
    }

    /// Split into metadata and body.
    pub fn into_parts(self) -> (Response, T) {
        let Response {
            method,
            url,
            status,
            headers,
            body,
        } = self;
        (Response::new(method, url, status, headers), body)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        let (meta, body) = self.into_parts();
        meta.with_body(f(body))
    }
}

impl<T> Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.body
    }
}

impl<T> fmt::Display for Response<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.method,
            redact_url(self.url.as_str()),
            self.status.as_u16()
        )
    }
}

impl<T: fmt::Debug> fmt::Debug for Response<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("method", &self.method)
            .field("url", &redact_url(self.url.as_str()))
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}

/// A response whose body is handed to the caller undecoded.
///
/// Returned by binary endpoints such as QR code retrieval. The caller must
/// drain the body with [`chunk`](Self::chunk) or [`bytes`](Self::bytes);
/// dropping it releases the connection.
pub struct StreamResponse {
    response: Response,
    body: StreamBody,
}

enum StreamBody {
    Live(reqwest::Response),
    Buffered(Option<Bytes>),
}

impl StreamResponse {
    pub(crate) fn live(response: Response, raw: reqwest::Response) -> Self {
        Self {
            response,
            body: StreamBody::Live(raw),
        }
    }

    pub(crate) fn buffered(response: Response, body: Bytes) -> Self {
        Self {
            response,
            body: StreamBody::Buffered(Some(body)),
        }
    }

    /// Response metadata.
    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// The `Content-Type` header, e.g. `image/jpeg`.
    pub fn content_type(&self) -> Option<&str> {
        content_type(self.response.headers())
    }

    /// Next chunk of the body, `None` once drained.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, WechatError> {
        match &mut self.body {
            StreamBody::Live(raw) => Ok(raw.chunk().await?),
            StreamBody::Buffered(body) => Ok(body.take()),
        }
    }

    /// Read the remaining body.
    pub async fn bytes(self) -> Result<Bytes, WechatError> {
        match self.body {
            StreamBody::Live(raw) => Ok(raw.bytes().await?),
            StreamBody::Buffered(body) => Ok(body.unwrap_or_default()),
        }
    }
}

impl fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResponse")
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

pub(crate) fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

/// Whether the body is JSON, i.e. an error envelope on a binary endpoint.
pub(crate) fn is_json(headers: &HeaderMap) -> bool {
    content_type(headers).is_some_and(|ct| {
        ct.split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    })
}
