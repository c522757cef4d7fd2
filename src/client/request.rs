//! Outbound request construction
//!
//! Resolves a relative path against the client's base URL, encodes the JSON
//! body and attaches the standard headers. No I/O happens here.

use http::header::{HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::Method;
use reqwest::Url;
use serde::Serialize;

use crate::error::WechatError;

const APPLICATION_JSON: &str = "application/json";

pub(crate) fn build_request<B: Serialize + ?Sized>(
    base_url: &Url,
    user_agent: &HeaderValue,
    method: Method,
    path: &str,
    body: Option<&B>,
) -> Result<reqwest::Request, WechatError> {
    validate_reference(path)?;

    let url = base_url.join(path).map_err(|e| WechatError::InvalidUrl {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let body = body
        .map(serde_json::to_vec)
        .transpose()
        .map_err(WechatError::Encode)?;

    let mut request = reqwest::Request::new(method, url);
    let headers = request.headers_mut();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(USER_AGENT, user_agent.clone());

    if let Some(body) = body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        *request.body_mut() = Some(body.into());
    }

    Ok(request)
}

/// Rejects references that would not resolve to a path under the base URL.
fn validate_reference(path: &str) -> Result<(), WechatError> {
    let invalid = |reason: &str| WechatError::InvalidUrl {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if path.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(invalid("invalid control character in URL"));
    }

    let first_segment = path.split(['/', '?', '#']).next().unwrap_or_default();
    match first_segment.find(':') {
        Some(0) => return Err(invalid("missing protocol scheme")),
        Some(_) => return Err(invalid("expected a path relative to the base URL")),
        None => {}
    }

    let bytes = path.as_bytes();
    for (i, _) in path.match_indices('%') {
        let escape = bytes.get(i + 1..i + 3);
        if !matches!(escape, Some([a, b]) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit()) {
            return Err(invalid("invalid URL escape"));
        }
    }

    Ok(())
}
