//! Server and web-view domain configuration

use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, Response};
use crate::context::Context;
use crate::error::WechatError;

/// `add`, `delete`, `set` or `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainAction {
    Add,
    Delete,
    Set,
    Get,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyDomainRequest {
    pub action: DomainAction,
    #[serde(rename = "requestdomain", skip_serializing_if = "Option::is_none")]
    pub request_domain: Option<Vec<String>>,
    #[serde(rename = "wsrequestdomain", skip_serializing_if = "Option::is_none")]
    pub ws_request_domain: Option<Vec<String>>,
    #[serde(rename = "uploaddomain", skip_serializing_if = "Option::is_none")]
    pub upload_domain: Option<Vec<String>>,
    #[serde(rename = "downloaddomain", skip_serializing_if = "Option::is_none")]
    pub download_domain: Option<Vec<String>>,
}

impl ModifyDomainRequest {
    pub fn new(action: DomainAction) -> Self {
        Self {
            action,
            request_domain: None,
            ws_request_domain: None,
            upload_domain: None,
            download_domain: None,
        }
    }
}

/// Domains currently configured
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(
        default,
        rename = "requestdomain",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_domain: Option<Vec<String>>,
    #[serde(
        default,
        rename = "wsrequestdomain",
        skip_serializing_if = "Option::is_none"
    )]
    pub ws_request_domain: Option<Vec<String>>,
    #[serde(
        default,
        rename = "uploaddomain",
        skip_serializing_if = "Option::is_none"
    )]
    pub upload_domain: Option<Vec<String>>,
    #[serde(
        default,
        rename = "downloaddomain",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_domain: Option<Vec<String>>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetWebviewDomainRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<DomainAction>,
    #[serde(rename = "webviewdomain", skip_serializing_if = "Option::is_none")]
    pub webview_domain: Option<Vec<String>>,
}

/// Domain API
#[derive(Debug, Clone, Copy)]
pub struct DomainApi<'a> {
    client: &'a Client,
}

impl<'a> DomainApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /wxa/modify_domain
    pub async fn modify_domain(
        &self,
        ctx: &Context,
        token: &str,
        request: &ModifyDomainRequest,
    ) -> Result<Response<Domain>, WechatError> {
        let path = self.authed("wxa/modify_domain", token);
        self.client().post(ctx, &path, request).await
    }

    /// POST /wxa/setwebviewdomain
    pub async fn set_webview_domain(
        &self,
        ctx: &Context,
        token: &str,
        request: &SetWebviewDomainRequest,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/setwebviewdomain", token);
        self.client().post_discard(ctx, &path, Some(request)).await
    }
}

impl WechatApi for DomainApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "domain"
    }
}
