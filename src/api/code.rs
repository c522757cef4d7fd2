//! Code management API
//!
//! Upload, audit, release and rollback of mini program code committed by
//! the third-party platform.

use http::Method;
use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, Response, StreamResponse};
use crate::context::Context;
use crate::error::WechatError;
use crate::utils::append_query;

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub template_id: i64,
    #[serde(rename = "ext_json")]
    pub extra_json: String,
    pub user_version: String,
    pub user_desc: String,
}

impl CommitRequest {
    pub fn new(
        template_id: i64,
        extra_json: impl Into<String>,
        user_version: impl Into<String>,
        user_desc: impl Into<String>,
    ) -> Self {
        Self {
            template_id,
            extra_json: extra_json.into(),
            user_version: user_version.into(),
            user_desc: user_desc.into(),
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_list: Option<Vec<String>>,
}

/// Category and page of an audit item
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewInfo {
    #[serde(
        default,
        rename = "video_id_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub video_ids: Option<Vec<String>>,
    #[serde(
        default,
        rename = "pic_id_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub picture_ids: Option<Vec<String>>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAuditRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_list: Option<Vec<AuditItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_info: Option<PreviewInfo>,
    #[serde(rename = "version_desc", skip_serializing_if = "Option::is_none")]
    pub version_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_stuff: Option<String>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    #[serde(default, rename = "auditid", skip_serializing_if = "Option::is_none")]
    pub audit_id: Option<i64>,
}

/// Audit state. The screenshot key comes back in two spellings.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(default, rename = "ScreenShot", skip_serializing_if = "Option::is_none")]
    pub screen_shot: Option<String>,
}

impl AuditStatus {
    /// Whichever screenshot key the server filled.
    pub fn screenshot(&self) -> Option<&str> {
        self.screenshot.as_deref().or(self.screen_shot.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct AuditIdRequest {
    #[serde(rename = "auditid")]
    audit_id: i64,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrayReleaseRequest {
    pub gray_percentage: i32,
}

impl GrayReleaseRequest {
    pub fn new(gray_percentage: i32) -> Self {
        Self { gray_percentage }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrayReleasePlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gray_percentage: Option<i32>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrayReleaseDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gray_release_plan: Option<GrayReleasePlan>,
}

/// `close` or `open` online access to the mini program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitAction {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct ChangeVisitStatusRequest {
    action: VisitAction,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speedup_rest: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speedup_limit: Option<i64>,
}

/// Code management API
#[derive(Debug, Clone, Copy)]
pub struct CodeApi<'a> {
    client: &'a Client,
}

impl<'a> CodeApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Upload code built from a template.
    ///
    /// POST /wxa/commit
    pub async fn commit(
        &self,
        ctx: &Context,
        token: &str,
        request: &CommitRequest,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/commit", token);
        self.client().post_discard(ctx, &path, Some(request)).await
    }

    /// GET /wxa/get_page
    pub async fn get_pages(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<Pages>, WechatError> {
        let path = self.authed("wxa/get_page", token);
        self.client().get(ctx, &path).await
    }

    /// Trial version QR code image for `page`. The body is returned
    /// undecoded.
    ///
    /// GET /wxa/get_qrcode
    pub async fn get_qrcode(
        &self,
        ctx: &Context,
        token: &str,
        page: &str,
    ) -> Result<StreamResponse, WechatError> {
        let path = append_query(&self.authed("wxa/get_qrcode", token), "path", page);
        let request = self.client().new_request::<()>(Method::GET, &path, None)?;
        self.client().execute_stream(ctx, request).await
    }

    /// POST /wxa/submit_audit
    pub async fn submit_audit(
        &self,
        ctx: &Context,
        token: &str,
        request: &SubmitAuditRequest,
    ) -> Result<Response<Audit>, WechatError> {
        let path = self.authed("wxa/submit_audit", token);
        self.client().post(ctx, &path, request).await
    }

    /// POST /wxa/get_auditstatus
    pub async fn get_audit_status(
        &self,
        ctx: &Context,
        token: &str,
        audit_id: i64,
    ) -> Result<Response<AuditStatus>, WechatError> {
        let path = self.authed("wxa/get_auditstatus", token);
        self.client().post(ctx, &path, &AuditIdRequest { audit_id }).await
    }

    /// GET /wxa/get_latest_auditstatus
    pub async fn get_latest_audit_status(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<AuditStatus>, WechatError> {
        let path = self.authed("wxa/get_latest_auditstatus", token);
        self.client().get(ctx, &path).await
    }

    /// GET /wxa/undocodeaudit
    pub async fn undo_code_audit(&self, ctx: &Context, token: &str) -> Result<Response, WechatError> {
        let path = self.authed("wxa/undocodeaudit", token);
        self.client().get_discard(ctx, &path).await
    }

    /// Publish the audited version. Sends an empty JSON object.
    ///
    /// POST /wxa/release
    pub async fn release(&self, ctx: &Context, token: &str) -> Result<Response, WechatError> {
        let path = self.authed("wxa/release", token);
        let body = serde_json::Map::new();
        self.client().post_discard(ctx, &path, Some(&body)).await
    }

    /// POST /wxa/revertcoderelease
    pub async fn revert_code_release(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/revertcoderelease", token);
        self.client().post_discard::<()>(ctx, &path, None).await
    }

    /// POST /wxa/grayrelease
    pub async fn gray_release(
        &self,
        ctx: &Context,
        token: &str,
        request: &GrayReleaseRequest,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/grayrelease", token);
        self.client().post_discard(ctx, &path, Some(request)).await
    }

    /// GET /wxa/getgrayreleaseplan
    pub async fn get_gray_release_plan(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<GrayReleaseDetail>, WechatError> {
        let path = self.authed("wxa/getgrayreleaseplan", token);
        self.client().get(ctx, &path).await
    }

    /// POST /wxa/revertgrayrelease
    pub async fn revert_gray_release(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/revertgrayrelease", token);
        self.client().post_discard::<()>(ctx, &path, None).await
    }

    /// POST /wxa/change_visitstatus
    pub async fn change_visit_status(
        &self,
        ctx: &Context,
        token: &str,
        action: VisitAction,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/change_visitstatus", token);
        let body = ChangeVisitStatusRequest { action };
        self.client().post_discard(ctx, &path, Some(&body)).await
    }

    /// GET /wxa/queryquota
    pub async fn query_quota(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<Quota>, WechatError> {
        let path = self.authed("wxa/queryquota", token);
        self.client().get(ctx, &path).await
    }

    /// POST /wxa/speedupaudit
    pub async fn speedup_audit(
        &self,
        ctx: &Context,
        token: &str,
        audit_id: i64,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/speedupaudit", token);
        let body = AuditIdRequest { audit_id };
        self.client().post_discard(ctx, &path, Some(&body)).await
    }
}

impl WechatApi for CodeApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "code"
    }
}
