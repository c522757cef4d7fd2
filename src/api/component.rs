//! Third-party platform component API

use std::fmt;

use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, Response};
use crate::context::Context;
use crate::error::WechatError;

#[non_exhaustive]
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiComponentTokenRequest {
    pub component_app_id: String,
    #[serde(rename = "component_appsecret")]
    pub component_app_secret: String,
    pub component_verify_ticket: String,
}

impl ApiComponentTokenRequest {
    pub fn new(
        component_app_id: impl Into<String>,
        component_app_secret: impl Into<String>,
        component_verify_ticket: impl Into<String>,
    ) -> Self {
        Self {
            component_app_id: component_app_id.into(),
            component_app_secret: component_app_secret.into(),
            component_verify_ticket: component_verify_ticket.into(),
        }
    }
}

impl fmt::Debug for ApiComponentTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiComponentTokenRequest")
            .field("component_app_id", &self.component_app_id)
            .field("component_app_secret", &"[REDACTED]")
            .field("component_verify_ticket", &"[REDACTED]")
            .finish()
    }
}

/// Component access token
#[non_exhaustive]
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

impl fmt::Debug for ComponentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentToken")
            .field(
                "component_access_token",
                &self.component_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Legal person data for fast mini program registration
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastRegisterWeappRequest {
    pub name: String,
    pub code: String,
    pub code_type: i32,
    pub legal_persona_wechat: String,
    pub legal_persona_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_phone: Option<String>,
}

impl FastRegisterWeappRequest {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        code_type: i32,
        legal_persona_wechat: impl Into<String>,
        legal_persona_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            code_type,
            legal_persona_wechat: legal_persona_wechat.into(),
            legal_persona_name: legal_persona_name.into(),
            component_phone: None,
        }
    }

    pub fn with_component_phone(mut self, phone: impl Into<String>) -> Self {
        self.component_phone = Some(phone.into());
        self
    }
}

/// Component API
#[derive(Debug, Clone, Copy)]
pub struct ComponentApi<'a> {
    client: &'a Client,
}

impl<'a> ComponentApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Exchange the component credentials for a component access token.
    ///
    /// POST /cgi-bin/component/api_component_token
    pub async fn api_component_token(
        &self,
        ctx: &Context,
        request: &ApiComponentTokenRequest,
    ) -> Result<Response<ComponentToken>, WechatError> {
        self.client()
            .post(ctx, "cgi-bin/component/api_component_token", request)
            .await
    }

    /// Create a mini program on behalf of a legal person.
    ///
    /// POST /cgi-bin/component/fastregisterweapp?action=create
    pub async fn fast_register_weapp(
        &self,
        ctx: &Context,
        component_token: &str,
        request: &FastRegisterWeappRequest,
    ) -> Result<Response, WechatError> {
        let path = self.authed_with(
            "cgi-bin/component/fastregisterweapp?action=create",
            "component_access_token",
            component_token,
        );
        self.client().post_discard(ctx, &path, Some(request)).await
    }
}

impl WechatApi for ComponentApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "component"
    }
}
