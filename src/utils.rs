use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Query keys whose values never reach logs or error messages.
const SENSITIVE_FIELDS: &[&str] = &[
    "access_token",
    "component_access_token",
    "authorizer_access_token",
    "component_appsecret",
    "appsecret",
    "secret",
    "token",
];

/// Unreserved characters (RFC 3986) stay as-is in query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub(crate) fn redact_url(url: &str) -> String {
    let Some(idx) = url.find('?') else {
        return url.to_string();
    };

    let base = &url[..idx];
    let query = &url[idx + 1..];
    let redacted_query = query
        .split('&')
        .map(|param| match param.split_once('=') {
            Some((key, _)) if SENSITIVE_FIELDS.iter().any(|s| key.eq_ignore_ascii_case(s)) => {
                format!("{key}=[REDACTED]")
            }
            _ => param.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{base}?{redacted_query}")
}

/// Appends `key=value` to `path`, percent-encoding the value.
pub(crate) fn append_query(path: &str, key: &str, value: &str) -> String {
    let encoded = utf8_percent_encode(value, QUERY_VALUE);
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{key}={encoded}")
}
