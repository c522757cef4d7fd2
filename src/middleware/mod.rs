//! Middleware components for the Open Platform client.
//!
//! Middleware are plain [`tower::Layer`]s wrapping the [`reqwest::Client`]
//! transport and are installed with
//! [`ClientBuilder::with_middleware`](crate::ClientBuilder::with_middleware).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wechat_oplatform::middleware::LoggingMiddleware;
//! use wechat_oplatform::Client;
//!
//! # fn main() -> Result<(), wechat_oplatform::WechatError> {
//! let client = Client::builder()
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
