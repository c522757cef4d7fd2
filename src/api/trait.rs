//! Base trait for Open Platform endpoint families

use log::debug;

use crate::client::Client;
use crate::utils::append_query;

/// Trait for endpoint family implementations.
///
/// Every family borrows the shared [`Client`], so configuration and
/// transport are never duplicated.
pub trait WechatApi: Send + Sync {
    /// Get a reference to the shared client
    fn client(&self) -> &Client;

    /// Get the name of this API for logging and error context.
    fn api_name(&self) -> &'static str {
        "unknown"
    }

    /// `path` with `access_token=<token>` appended to its query.
    fn authed(&self, path: &str, token: &str) -> String {
        self.authed_with(path, "access_token", token)
    }

    /// `path` with `key=<token>` appended to its query.
    fn authed_with(&self, path: &str, key: &str, token: &str) -> String {
        debug!("[WechatOp] {}: {}", self.api_name(), path);
        append_query(path, key, token)
    }
}
