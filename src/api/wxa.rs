//! Tester management and "show in official account" settings

use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, Response};
use crate::context::Context;
use crate::error::WechatError;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindTesterRequest {
    #[serde(rename = "wechatid")]
    pub wechat_id: String,
}

impl BindTesterRequest {
    pub fn new(wechat_id: impl Into<String>) -> Self {
        Self {
            wechat_id: wechat_id.into(),
        }
    }
}

/// A bound tester, identified by an opaque user string
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tester {
    #[serde(
        default,
        rename = "userstr",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_string: Option<String>,
}

/// Unbind by either the user string or the WeChat ID.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnbindTesterRequest {
    #[serde(rename = "userstr", skip_serializing_if = "Option::is_none")]
    pub user_string: Option<String>,
    #[serde(rename = "wechatid", skip_serializing_if = "Option::is_none")]
    pub wechat_id: Option<String>,
}

impl UnbindTesterRequest {
    pub fn by_user_string(user_string: impl Into<String>) -> Self {
        Self {
            user_string: Some(user_string.into()),
            wechat_id: None,
        }
    }

    pub fn by_wechat_id(wechat_id: impl Into<String>) -> Self {
        Self {
            user_string: None,
            wechat_id: Some(wechat_id.into()),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Tester>>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowWxaItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_open: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<i32>,
    #[serde(default, rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, rename = "headimg", skip_serializing_if = "Option::is_none")]
    pub head_image: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxaMpLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, rename = "headimg", skip_serializing_if = "Option::is_none")]
    pub head_image: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxaMpLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biz_info_list: Option<Vec<WxaMpLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_num: Option<i64>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateShowWxaItemRequest {
    pub wxa_subscribe_biz_flag: i32,
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
}

impl UpdateShowWxaItemRequest {
    /// Turn the display off.
    pub fn disable() -> Self {
        Self {
            wxa_subscribe_biz_flag: 0,
            app_id: None,
        }
    }

    /// Show the official account `app_id`.
    pub fn enable(app_id: impl Into<String>) -> Self {
        Self {
            wxa_subscribe_biz_flag: 1,
            app_id: Some(app_id.into()),
        }
    }
}

/// Mini program admin API
#[derive(Debug, Clone, Copy)]
pub struct WxaApi<'a> {
    client: &'a Client,
}

impl<'a> WxaApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /wxa/bind_tester
    pub async fn bind_tester(
        &self,
        ctx: &Context,
        token: &str,
        request: &BindTesterRequest,
    ) -> Result<Response<Tester>, WechatError> {
        let path = self.authed("wxa/bind_tester", token);
        self.client().post(ctx, &path, request).await
    }

    /// POST /wxa/unbind_tester
    pub async fn unbind_tester(
        &self,
        ctx: &Context,
        token: &str,
        request: &UnbindTesterRequest,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/unbind_tester", token);
        self.client().post_discard(ctx, &path, Some(request)).await
    }

    /// List bound testers.
    ///
    /// POST /wxa/memberauth
    pub async fn member_auth(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<Testers>, WechatError> {
        let path = self.authed("wxa/memberauth", token);
        let body = serde_json::json!({ "action": "get_experiencer" });
        self.client().post(ctx, &path, &body).await
    }

    /// GET /wxa/getshowwxaitem
    pub async fn get_show_wxa_item(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<ShowWxaItem>, WechatError> {
        let path = self.authed("wxa/getshowwxaitem", token);
        self.client().get(ctx, &path).await
    }

    /// Official accounts that can be shown, paged by `page` and `num`.
    ///
    /// GET /wxa/getwxamplinkforshow
    pub async fn get_wxa_mp_link_for_show(
        &self,
        ctx: &Context,
        token: &str,
        page: u32,
        num: u32,
    ) -> Result<Response<WxaMpLinks>, WechatError> {
        let path = format!(
            "{}&page={page}&num={num}",
            self.authed("wxa/getwxamplinkforshow", token)
        );
        self.client().get(ctx, &path).await
    }

    /// POST /wxa/updateshowwxaitem
    pub async fn update_show_wxa_item(
        &self,
        ctx: &Context,
        token: &str,
        request: &UpdateShowWxaItemRequest,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/updateshowwxaitem", token);
        self.client().post_discard(ctx, &path, Some(request)).await
    }
}

impl WechatApi for WxaApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "wxa"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_name() {
        let client = Client::new(None).unwrap();
        let api = WxaApi::new(&client);
        assert_eq!(api.api_name(), "wxa");
        assert!(std::ptr::eq(api.client(), &client));
    }

    #[test]
    fn test_request_bodies_survive_json_round_trip() {
        let bind = BindTesterRequest::new("wxid_1");
        let json = serde_json::to_string(&bind).unwrap();
        assert_eq!(serde_json::from_str::<BindTesterRequest>(&json).unwrap(), bind);

        let unbind = UnbindTesterRequest::by_user_string("u1");
        let json = serde_json::to_string(&unbind).unwrap();
        assert_eq!(serde_json::from_str::<UnbindTesterRequest>(&json).unwrap(), unbind);

        let disable = UpdateShowWxaItemRequest::disable();
        let json = serde_json::to_string(&disable).unwrap();
        let decoded: UpdateShowWxaItemRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, disable);
        assert_eq!(decoded.wxa_subscribe_biz_flag, 0);
    }

    #[test]
    fn test_unbind_serializes_one_identifier() {
        let json = serde_json::to_value(UnbindTesterRequest::by_wechat_id("wxid_1")).unwrap();
        assert_eq!(json, serde_json::json!({ "wechatid": "wxid_1" }));

        let json = serde_json::to_value(UnbindTesterRequest::by_user_string("u1")).unwrap();
        assert_eq!(json, serde_json::json!({ "userstr": "u1" }));
    }

    #[test]
    fn test_update_show_item_disable_keeps_zero_flag() {
        let json = serde_json::to_value(UpdateShowWxaItemRequest::disable()).unwrap();
        assert_eq!(json, serde_json::json!({ "wxa_subscribe_biz_flag": 0 }));
    }

    #[test]
    fn test_mp_links_deserialize() {
        let json = r#"{
            "errcode": 0,
            "biz_info_list": [{"nickname": "hello", "appid": "wx1", "headimg": "http://x/0"}],
            "total_num": 1
        }"#;
        let links: WxaMpLinks = serde_json::from_str(json).unwrap();
        let list = links.biz_info_list.unwrap();
        assert_eq!(list[0].app_id.as_deref(), Some("wx1"));
        assert_eq!(list[0].head_image.as_deref(), Some("http://x/0"));
        assert_eq!(links.total_num, Some(1));
    }
}
