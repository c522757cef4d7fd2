//! WeChat HTTP Client
//!
//! Provides the shared transport used by every endpoint family: request
//! construction, the HTTP exchange under a [`Context`], error envelope
//! checking and JSON decoding.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::header::HeaderValue;
use http::Method;
use log::{debug, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::request::build_request;
use super::response::{is_json, Response, StreamResponse};
use super::ClientBuilder;
use crate::api::{
    AccountApi, CodeApi, CodeTemplateApi, ComponentApi, DomainApi, LiveApi, PluginApi, QrcodeApi,
    WxaApi,
};
use crate::context::Context;
use crate::error::{check_response, WechatError};
use crate::utils::redact_url;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.weixin.qq.com/";
pub(crate) const DEFAULT_USER_AGENT: &str = concat!("wechat-oplatform/", env!("CARGO_PKG_VERSION"));

/// A typed destination is decoded from `{}` when the body is empty.
const EMPTY_OBJECT: &[u8] = b"{}";

pub(crate) type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// WeChat Open Platform API client
///
/// Holds the base URL, user agent and HTTP transport shared by all endpoint
/// families. Cloning is cheap and clones share the connection pool. The
/// client keeps no per-call state, so one instance can serve concurrent
/// callers.
///
/// # Example
///
/// ```rust,no_run
/// use wechat_oplatform::{Client, Context};
///
/// # async fn example() -> Result<(), wechat_oplatform::WechatError> {
/// let client = Client::new(None)?;
/// let ctx = Context::background();
///
/// let pages = client.code().get_pages(&ctx, "access_token").await?;
/// println!("{:?}", pages.page_list);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    user_agent: String,
    user_agent_header: HeaderValue,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client with the default base URL and user agent.
    ///
    /// When `http` is `None` a new [`reqwest::Client`] is built, so two
    /// clients created this way never share a connection pool.
    pub fn new(http: Option<reqwest::Client>) -> Result<Self, WechatError> {
        let builder = Self::builder();
        match http {
            Some(http) => builder.http_client(http).build(),
            None => builder.build(),
        }
    }

    /// Create a new client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        base_url: Url,
        user_agent: String,
        user_agent_header: HeaderValue,
        middleware_executor: Option<MiddlewareExecutor>,
    ) -> Self {
        Self {
            http,
            base_url,
            user_agent,
            user_agent_header,
            middleware_executor,
        }
    }

    /// Get the base URL, always terminated by `/`
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the `User-Agent` sent with every request
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the underlying [`reqwest::Client`].
    ///
    /// Note: requests sent directly through it bypass the middleware pipeline
    /// and the error envelope check.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }

    pub fn component(&self) -> ComponentApi<'_> {
        ComponentApi::new(self)
    }

    pub fn wxa(&self) -> WxaApi<'_> {
        WxaApi::new(self)
    }

    pub fn code(&self) -> CodeApi<'_> {
        CodeApi::new(self)
    }

    pub fn code_template(&self) -> CodeTemplateApi<'_> {
        CodeTemplateApi::new(self)
    }

    pub fn domain(&self) -> DomainApi<'_> {
        DomainApi::new(self)
    }

    pub fn live(&self) -> LiveApi<'_> {
        LiveApi::new(self)
    }

    pub fn plugin(&self) -> PluginApi<'_> {
        PluginApi::new(self)
    }

    pub fn qrcode(&self) -> QrcodeApi<'_> {
        QrcodeApi::new(self)
    }

    /// Build a request for `path`, resolved against the base URL.
    ///
    /// `path` may carry a query string. When `body` is present it is encoded
    /// as JSON and `Content-Type: application/json` is set; `Accept` and
    /// `User-Agent` are always set.
    ///
    /// # Errors
    /// - `WechatError::InvalidUrl` when `path` is not a valid relative reference
    /// - `WechatError::Encode` when `body` cannot be represented as JSON
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request, WechatError> {
        build_request(&self.base_url, &self.user_agent_header, method, path, body)
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    /// Send `request` and decode the JSON body into `T`.
    ///
    /// The HTTP status alone never produces an error; inspect
    /// [`Response::status`] for that.
    ///
    /// # Errors
    /// - `WechatError::MissingContext` when `ctx` is `None`; nothing is sent
    /// - `WechatError::Transport` for connection failures or when `ctx` ends first
    /// - `WechatError::Api` when the body carries a non-zero `errcode`
    /// - `WechatError::Decode` when the body does not match `T`
    pub async fn execute<'c, T: DeserializeOwned>(
        &self,
        ctx: impl Into<Option<&'c Context>>,
        request: reqwest::Request,
    ) -> Result<Response<T>, WechatError> {
        let ctx = ctx.into().ok_or(WechatError::MissingContext)?;
        let (response, body) = self.round_trip(ctx, request).await?;

        let body = if body.is_empty() { EMPTY_OBJECT } else { &body[..] };
        match serde_json::from_slice(body) {
            Ok(value) => Ok(response.with_body(value)),
            Err(source) => Err(WechatError::Decode {
                response: Box::new(response),
                source,
            }),
        }
    }

    /// Send `request`, check the error envelope and discard the body.
    pub async fn execute_discard<'c>(
        &self,
        ctx: impl Into<Option<&'c Context>>,
        request: reqwest::Request,
    ) -> Result<Response, WechatError> {
        let ctx = ctx.into().ok_or(WechatError::MissingContext)?;
        let (response, _) = self.round_trip(ctx, request).await?;
        Ok(response)
    }

    /// Send `request` and hand the open body back undecoded.
    ///
    /// A JSON body on a binary endpoint is an error envelope: it is read and
    /// checked, and a non-zero `errcode` fails the call. Draining the returned
    /// stream is not bounded by `ctx`.
    pub async fn execute_stream<'c>(
        &self,
        ctx: impl Into<Option<&'c Context>>,
        request: reqwest::Request,
    ) -> Result<StreamResponse, WechatError> {
        let ctx = ctx.into().ok_or(WechatError::MissingContext)?;
        let method = request.method().clone();
        debug!("[WechatOp] >>> {} {} (stream)", method, redact_url(request.url().as_str()));

        let raw = ctx.run(self.send_request(request)).await??;
        let response = Response::from_raw(method, &raw);
        debug!("[WechatOp] <<< {}", response);

        if is_json(response.headers()) {
            let body = ctx.run(raw.bytes()).await??;
            self.check(&response, &body)?;
            return Ok(StreamResponse::buffered(response, body));
        }

        Ok(StreamResponse::live(response, raw))
    }

    /// GET `path` and decode the result.
    pub async fn get<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        path: &str,
    ) -> Result<Response<T>, WechatError> {
        let request = self.new_request::<()>(Method::GET, path, None)?;
        self.execute(ctx, request).await
    }

    /// POST `body` as JSON to `path` and decode the result.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        ctx: &Context,
        path: &str,
        body: &B,
    ) -> Result<Response<T>, WechatError> {
        let request = self.new_request(Method::POST, path, Some(body))?;
        self.execute(ctx, request).await
    }

    pub(crate) async fn get_discard(
        &self,
        ctx: &Context,
        path: &str,
    ) -> Result<Response, WechatError> {
        let request = self.new_request::<()>(Method::GET, path, None)?;
        self.execute_discard(ctx, request).await
    }

    pub(crate) async fn post_discard<B: Serialize + ?Sized>(
        &self,
        ctx: &Context,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, WechatError> {
        let request = self.new_request(Method::POST, path, body)?;
        self.execute_discard(ctx, request).await
    }

    async fn round_trip(
        &self,
        ctx: &Context,
        request: reqwest::Request,
    ) -> Result<(Response, bytes::Bytes), WechatError> {
        let method = request.method().clone();
        debug!("[WechatOp] >>> {} {}", method, redact_url(request.url().as_str()));

        let (response, body) = ctx
            .run(async {
                let raw = self.send_request(request).await?;
                let response = Response::from_raw(method, &raw);
                let body = raw.bytes().await?;
                Ok::<_, reqwest::Error>((response, body))
            })
            .await??;

        debug!("[WechatOp] <<< {} ({} bytes)", response, body.len());
        self.check(&response, &body)?;
        Ok((response, body))
    }

    fn check(&self, response: &Response, body: &[u8]) -> Result<(), WechatError> {
        check_response(response, body).map_err(|e| {
            warn!("[WechatOp] {e}");
            e
        })
    }
}
