use std::sync::Arc;
use std::time::Duration;

use http::header::HeaderValue;
use reqwest::{Request as ReqwestRequest, Response as ReqwestResponse, Url};
use tower::layer::util::Identity;
use tower::{Layer, Service};

use crate::error::WechatError;

use super::wechat_client::{Client, MiddlewareExecutor, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

/// Builder for [`Client`].
///
/// Nothing is applied to the transport unless set: there is no default
/// request timeout, callers bound calls with a [`Context`](crate::Context).
#[must_use]
pub struct ClientBuilder<M = Identity> {
    base_url: Option<String>,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    middleware: Option<M>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            http: None,
            timeout: None,
            connect_timeout: None,
            middleware: None,
        }
    }
}

impl<M> std::fmt::Debug for ClientBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl<M> ClientBuilder<M> {
    /// Root every request path is resolved against. Must use `http` or
    /// `https` and end with `/`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use an existing transport instead of building one.
    ///
    /// `timeout` and `connect_timeout` are ignored when this is set.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Wrap the transport in a [`tower::Layer`].
    ///
    /// The layer sees every request the client sends, after URL resolution
    /// and header injection.
    pub fn with_middleware<M2>(self, middleware: M2) -> ClientBuilder<M2>
    where
        M2: Layer<reqwest::Client> + Clone + Send + Sync + 'static,
    {
        ClientBuilder {
            base_url: self.base_url,
            user_agent: self.user_agent,
            http: self.http,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            middleware: Some(middleware),
        }
    }

    pub fn build(self) -> Result<Client, WechatError>
    where
        M: Layer<reqwest::Client> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let user_agent_header = HeaderValue::from_str(&user_agent).map_err(|e| {
            WechatError::Config(format!("invalid user_agent {user_agent:?}: {e}"))
        })?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(|e| {
                    WechatError::Config(format!("failed to build HTTP client: {e}"))
                })?
            }
        };

        let executor = self
            .middleware
            .map(|middleware| make_middleware_executor(middleware.layer(http.clone())));

        Ok(Client::from_parts(
            http,
            base_url,
            user_agent,
            user_agent_header,
            executor,
        ))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, WechatError> {
    let url = Url::parse(raw)
        .map_err(|e| WechatError::Config(format!("invalid base_url {raw:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(WechatError::Config(format!(
            "base_url must start with http:// or https://, got: {raw}"
        )));
    }

    if !url.path().ends_with('/') {
        return Err(WechatError::Config(format!(
            "base_url must have a trailing slash, but {raw:?} does not"
        )));
    }

    Ok(url)
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::{Context as TaskContext, Poll};

    use serde_json::Value;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::Context;

    #[test]
    fn test_builder_default_values() {
        let client = Client::builder().build().unwrap();

        assert_eq!(client.base_url().as_str(), "https://api.weixin.qq.com/");
        assert!(client.user_agent().starts_with("wechat-oplatform/"));
    }

    #[test]
    fn test_builder_custom_values() {
        let client = Client::builder()
            .base_url("https://custom.api.example.com/v1/")
            .user_agent("my-platform/2.0")
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "https://custom.api.example.com/v1/");
        assert_eq!(client.user_agent(), "my-platform/2.0");
    }

    #[test]
    fn test_host_only_base_url_gets_root_path() {
        let client = Client::builder()
            .base_url("https://custom.api.example.com")
            .build()
            .unwrap();
        assert_eq!(client.base_url().path(), "/");
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let err = Client::builder()
            .base_url("https://custom.api.example.com/v1")
            .build()
            .unwrap_err();
        assert!(matches!(err, WechatError::Config(_)));
    }

    #[test]
    fn test_base_url_bad_scheme() {
        for raw in ["ftp://example.com/", "mailto:someone@example.com", "not a url"] {
            let err = Client::builder().base_url(raw).build().unwrap_err();
            assert!(matches!(err, WechatError::Config(_)), "{raw}");
        }
    }

    #[test]
    fn test_invalid_user_agent() {
        let err = Client::builder()
            .user_agent("line\nbreak")
            .build()
            .unwrap_err();
        assert!(matches!(err, WechatError::Config(_)));
    }

    #[tokio::test]
    async fn test_middleware_configured_and_executes() {
        #[derive(Clone)]
        struct CountLayer {
            count: Arc<AtomicUsize>,
        }

        impl Layer<reqwest::Client> for CountLayer {
            type Service = CountService;

            fn layer(&self, inner: reqwest::Client) -> Self::Service {
                CountService {
                    inner,
                    count: Arc::clone(&self.count),
                }
            }
        }

        #[derive(Clone)]
        struct CountService {
            inner: reqwest::Client,
            count: Arc<AtomicUsize>,
        }

        impl Service<ReqwestRequest> for CountService {
            type Response = ReqwestResponse;
            type Error = reqwest::Error;
            type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

            fn poll_ready(&mut self, _cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
                Poll::Ready(Ok(()))
            }

            fn call(&mut self, req: ReqwestRequest) -> Self::Future {
                self.count.fetch_add(1, Ordering::SeqCst);
                let inner = self.inner.clone();
                Box::pin(async move { inner.execute(req).await })
            }
        }

        let count = Arc::new(AtomicUsize::new(0));
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wxa/get_page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"errcode": 0, "page_list": []})),
            )
            .mount(&mock_server)
            .await;

        let client = Client::builder()
            .base_url(format!("{}/", mock_server.uri()))
            .with_middleware(CountLayer {
                count: Arc::clone(&count),
            })
            .build()
            .unwrap();

        let resp = client
            .get::<Value>(&Context::background(), "wxa/get_page")
            .await
            .unwrap();

        assert_eq!(resp["page_list"], serde_json::json!([]));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_builder_with_logging_middleware() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wxa/get_page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = Client::builder()
            .base_url(format!("{}/", mock_server.uri()))
            .with_middleware(crate::middleware::LoggingMiddleware::new())
            .build()
            .unwrap();

        let result = client
            .get::<Value>(&Context::background(), "wxa/get_page?access_token=tok")
            .await;
        assert!(result.is_ok());
    }
}
