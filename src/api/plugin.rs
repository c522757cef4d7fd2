//! Plugin API

use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, Response};
use crate::context::Context;
use crate::error::WechatError;

/// Plugin management action: `apply`, `list`, `unbind`, `update`, ...
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRequest {
    pub action: String,
    #[serde(rename = "plugin_appid", skip_serializing_if = "Option::is_none")]
    pub plugin_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_version: Option<String>,
}

impl PluginRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            plugin_app_id: None,
            user_version: None,
        }
    }

    pub fn list() -> Self {
        Self::new("list")
    }

    pub fn apply(plugin_app_id: impl Into<String>) -> Self {
        Self::new("apply").with_plugin_app_id(plugin_app_id)
    }

    pub fn unbind(plugin_app_id: impl Into<String>) -> Self {
        Self::new("unbind").with_plugin_app_id(plugin_app_id)
    }

    pub fn with_plugin_app_id(mut self, plugin_app_id: impl Into<String>) -> Self {
        self.plugin_app_id = Some(plugin_app_id.into());
        self
    }

    pub fn with_user_version(mut self, user_version: impl Into<String>) -> Self {
        self.user_version = Some(user_version.into());
        self
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(default, rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(
        default,
        rename = "headimgurl",
        skip_serializing_if = "Option::is_none"
    )]
    pub head_img_url: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_list: Option<Vec<Plugin>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_list: Option<Vec<Plugin>>,
}

pub struct PluginApi<'a> {
    client: &'a Client,
}

impl<'a> PluginApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /wxa/plugin
    pub async fn manage(
        &self,
        ctx: &Context,
        token: &str,
        request: &PluginRequest,
    ) -> Result<Response<PluginResponse>, WechatError> {
        let path = self.authed("wxa/plugin", token);
        self.client().post(ctx, &path, request).await
    }
}

impl WechatApi for PluginApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "plugin"
    }
}
