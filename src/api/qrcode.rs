//! Mini program code and QR code API
//!
//! Every endpoint here answers with an image. Bodies are handed back as a
//! [`StreamResponse`]; a JSON body means the server reported an error and
//! fails the call instead.

use http::Method;
use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, StreamResponse};
use crate::context::Context;
use crate::error::WechatError;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQrcodeRequest {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl CreateQrcodeRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            width: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrcodeOptions {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_color: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<LineColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hyaline: Option<bool>,
}

impl QrcodeOptions {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlimitQrcodeOptions {
    pub scene: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_color: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<LineColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hyaline: Option<bool>,
}

impl UnlimitQrcodeOptions {
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            ..Default::default()
        }
    }
}

/// Mini program code and QR code API
pub struct QrcodeApi<'a> {
    client: &'a Client,
}

impl<'a> QrcodeApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Create a QR code for a page (limited total count).
    ///
    /// POST /cgi-bin/wxaapp/createwxaqrcode
    pub async fn create_wxa_qrcode(
        &self,
        ctx: &Context,
        token: &str,
        request: &CreateQrcodeRequest,
    ) -> Result<StreamResponse, WechatError> {
        self.image(ctx, self.authed("cgi-bin/wxaapp/createwxaqrcode", token), request)
            .await
    }

    /// Generate a mini program code (limited total count).
    ///
    /// POST /wxa/getwxacode
    pub async fn get_wxa_code(
        &self,
        ctx: &Context,
        token: &str,
        options: &QrcodeOptions,
    ) -> Result<StreamResponse, WechatError> {
        self.image(ctx, self.authed("wxa/getwxacode", token), options)
            .await
    }

    /// Generate a mini program code keyed by `scene` (no usage limit).
    ///
    /// POST /wxa/getwxacodeunlimit
    pub async fn get_wxa_code_unlimit(
        &self,
        ctx: &Context,
        token: &str,
        options: &UnlimitQrcodeOptions,
    ) -> Result<StreamResponse, WechatError> {
        self.image(ctx, self.authed("wxa/getwxacodeunlimit", token), options)
            .await
    }

    async fn image<B: Serialize>(
        &self,
        ctx: &Context,
        path: String,
        body: &B,
    ) -> Result<StreamResponse, WechatError> {
        let request = self.client().new_request(Method::POST, &path, Some(body))?;
        self.client().execute_stream(ctx, request).await
    }
}

impl WechatApi for QrcodeApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "qrcode"
    }
}
