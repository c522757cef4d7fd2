//! Live streaming room API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, Response};
use crate::context::Context;
use crate::error::WechatError;

/// Page through rooms, or pass `action = "get_replay"` with a room id for
/// its replays.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetLiveInfoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    pub start: u32,
    pub limit: u32,
}

impl GetLiveInfoRequest {
    pub fn rooms(start: u32, limit: u32) -> Self {
        Self {
            action: None,
            room_id: None,
            start,
            limit,
        }
    }

    pub fn replays(room_id: i64, start: u32, limit: u32) -> Self {
        Self {
            action: Some("get_replay".to_string()),
            room_id: Some(room_id),
            start,
            limit,
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveReplay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Good {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Price in fen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price2: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "roomid", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_status: Option<i32>,
    /// Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods: Option<Vec<Good>>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_info: Option<Vec<RoomInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_replay: Option<Vec<LiveReplay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

/// Live streaming API
#[derive(Debug, Clone, Copy)]
pub struct LiveApi<'a> {
    client: &'a Client,
}

impl<'a> LiveApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// POST /wxa/business/getliveinfo
    pub async fn get_live_info(
        &self,
        ctx: &Context,
        token: &str,
        request: &GetLiveInfoRequest,
    ) -> Result<Response<LiveInfo>, WechatError> {
        let path = self.authed("wxa/business/getliveinfo", token);
        self.client().post(ctx, &path, request).await
    }
}

impl WechatApi for LiveApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "live"
    }
}
