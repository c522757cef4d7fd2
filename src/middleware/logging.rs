use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use log::{debug, info};
use reqwest::{Request, Response};
use tower::{Layer, Service};

use crate::utils::redact_url;

/// Logs each exchange with its method, redacted URL, status and latency.
///
/// Tokens and secrets in the query string are replaced by `[REDACTED]`.
/// Logs at `info` by default, or at `debug` with [`verbose`](Self::verbose).
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

fn log_request(method: &str, url: &str, verbose: bool) {
    let safe_url = redact_url(url);
    if verbose {
        debug!("[WechatOp] >>> {} {}", method, safe_url);
    } else {
        info!("[WechatOp] {} {}", method, safe_url);
    }
}

fn log_response(status: reqwest::StatusCode, duration: std::time::Duration, verbose: bool) {
    if verbose {
        debug!(
            "[WechatOp] <<< {} - {} ({:?})",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration
        );
    } else {
        info!("[WechatOp] {} ({:?})", status.as_u16(), duration);
    }
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: std::fmt::Display + Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().as_str().to_string();
        let url = req.url().to_string();
        let verbose = self.verbose;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            log_request(&method, &url, verbose);

            let start = Instant::now();
            let response = inner.call(req).await.map_err(|e| {
                info!("[WechatOp] {} {} failed: {}", method, redact_url(&url), e);
                e
            })?;

            log_response(response.status(), start.elapsed(), verbose);
            Ok(response)
        })
    }
}
