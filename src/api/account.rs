//! Account API
//!
//! Basic information of an authorized mini program.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, Response};
use crate::context::Context;
use crate::error::WechatError;

/// WeChat verification state
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxVerifyInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naming_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_review: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_review_begin_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_review_end_time: Option<DateTime<Utc>>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modify_used_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modify_quota: Option<i64>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadImageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modify_used_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modify_quota: Option<i64>,
}

/// Response of `cgi-bin/account/getaccountbasicinfo`
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBasicInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,
    #[serde(
        default,
        rename = "realname_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub real_name_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wx_verify_info: Option<WxVerifyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_info: Option<SignatureInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_image_info: Option<HeadImageInfo>,
}

/// Account API
#[derive(Debug, Clone, Copy)]
pub struct AccountApi<'a> {
    client: &'a Client,
}

impl<'a> AccountApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch the basic information of the authorized account.
    ///
    /// GET /cgi-bin/account/getaccountbasicinfo
    pub async fn get_account_basic_info(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<AccountBasicInfo>, WechatError> {
        let path = self.authed("cgi-bin/account/getaccountbasicinfo", token);
        self.client().get(ctx, &path).await
    }
}

impl WechatApi for AccountApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "account"
    }
}
