//! Code template library API

use serde::{Deserialize, Serialize};

use super::WechatApi;
use crate::client::{Client, Response};
use crate::context::Context;
use crate::error::WechatError;

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_version: Option<String>,
    #[serde(default, rename = "user_desc", skip_serializing_if = "Option::is_none")]
    pub user_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<i64>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDrafts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_list: Option<Vec<Draft>>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_list: Option<Vec<Template>>,
}

#[derive(Serialize)]
struct DraftIdRequest {
    draft_id: i64,
}

#[derive(Serialize)]
struct TemplateIdRequest {
    template_id: i64,
}

/// Code template API
#[derive(Debug, Clone, Copy)]
pub struct CodeTemplateApi<'a> {
    client: &'a Client,
}

impl<'a> CodeTemplateApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /wxa/gettemplatedraftlist
    pub async fn get_template_drafts(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<TemplateDrafts>, WechatError> {
        let path = self.authed("wxa/gettemplatedraftlist", token);
        self.client().get(ctx, &path).await
    }

    /// POST /wxa/addtotemplate
    pub async fn add_draft_to_template(
        &self,
        ctx: &Context,
        token: &str,
        draft_id: i64,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/addtotemplate", token);
        self.client()
            .post_discard(ctx, &path, Some(&DraftIdRequest { draft_id }))
            .await
    }

    /// GET /wxa/gettemplatelist
    pub async fn get_templates(
        &self,
        ctx: &Context,
        token: &str,
    ) -> Result<Response<Templates>, WechatError> {
        let path = self.authed("wxa/gettemplatelist", token);
        self.client().get(ctx, &path).await
    }

    /// POST /wxa/deletetemplate
    pub async fn delete_template(
        &self,
        ctx: &Context,
        token: &str,
        template_id: i64,
    ) -> Result<Response, WechatError> {
        let path = self.authed("wxa/deletetemplate", token);
        self.client()
            .post_discard(ctx, &path, Some(&TemplateIdRequest { template_id }))
            .await
    }
}

impl WechatApi for CodeTemplateApi<'_> {
    fn client(&self) -> &Client {
        self.client
    }

    fn api_name(&self) -> &'static str {
        "code_template"
    }
}
