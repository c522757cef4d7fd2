//! WeChat Open Platform endpoint families
//!
//! Each family borrows the shared [`Client`](crate::Client) and is reached
//! through an accessor such as [`Client::code`](crate::Client::code):
//!
//! - [`account`] - Authorized account basic info
//! - [`component`] - Component access token and fast registration
//! - [`wxa`] - Testers and "show in official account" settings
//! - [`code`] - Code commit, audit, release and rollback
//! - [`code_template`] - Template drafts and template library
//! - [`domain`] - Server and web-view domains
//! - [`live`] - Live streaming rooms and replays
//! - [`plugin`] - Plugin management
//! - [`qrcode`] - Mini program codes and QR codes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wechat_oplatform::api::code::GrayReleaseRequest;
//! use wechat_oplatform::{Client, Context};
//!
//! # async fn example() -> Result<(), wechat_oplatform::WechatError> {
//! let client = Client::new(None)?;
//! let ctx = Context::background();
//!
//! client
//!     .code()
//!     .gray_release(&ctx, "access_token", &GrayReleaseRequest::new(10))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod code;
pub mod code_template;
pub mod component;
pub mod domain;
pub mod live;
pub mod plugin;
pub mod qrcode;
pub mod r#trait;
pub mod wxa;

pub use account::{AccountApi, AccountBasicInfo, HeadImageInfo, SignatureInfo, WxVerifyInfo};
pub use code::{
    Audit, AuditItem, AuditStatus, CodeApi, CommitRequest, GrayReleaseDetail, GrayReleasePlan,
    GrayReleaseRequest, Pages, PreviewInfo, Quota, SubmitAuditRequest, VisitAction,
};
pub use code_template::{CodeTemplateApi, Draft, Template, TemplateDrafts, Templates};
pub use component::{
    ApiComponentTokenRequest, ComponentApi, ComponentToken, FastRegisterWeappRequest,
};
pub use domain::{Domain, DomainAction, DomainApi, ModifyDomainRequest, SetWebviewDomainRequest};
pub use live::{GetLiveInfoRequest, Good, LiveApi, LiveInfo, LiveReplay, RoomInfo};
pub use plugin::{Plugin, PluginApi, PluginRequest, PluginResponse};
pub use qrcode::{CreateQrcodeRequest, LineColor, QrcodeApi, QrcodeOptions, UnlimitQrcodeOptions};
pub use r#trait::WechatApi;
pub use wxa::{
    BindTesterRequest, ShowWxaItem, Tester, Testers, UnbindTesterRequest,
    UpdateShowWxaItemRequest, WxaApi, WxaMpLink, WxaMpLinks,
};
