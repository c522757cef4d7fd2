//! WeChat Open Platform client for Rust
//!
//! A typed client for the WeChat Open Platform (third-party platform) HTTP
//! API. A third-party platform operates mini programs on behalf of their
//! owners: it commits code, submits it for audit, releases it, manages
//! testers, domains and plugins, and fetches QR codes.
//!
//! Access tokens are supplied by the caller on every call; this crate does
//! not fetch or refresh them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use wechat_oplatform::{Client, Context};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(None)?;
//!     let ctx = Context::with_timeout(Duration::from_secs(10));
//!
//!     let quota = client.code().query_quota(&ctx, "authorizer_access_token").await?;
//!     println!("audits left: {:?}", quota.rest);
//!
//!     let mut image = client
//!         .code()
//!         .get_qrcode(&ctx, "authorizer_access_token", "pages/index?id=1")
//!         .await?;
//!     while let Some(chunk) = image.chunk().await? {
//!         println!("{} bytes", chunk.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Endpoint families (account, code, domain, qrcode, etc.)
//! - [`client`] - Request construction, execution and response types
//! - [`context`] - Cancellation and deadlines
//! - [`error`] - Error types
//! - [`middleware`] - Tower layers for the transport
//!
//! ## Error Handling
//!
//! Business errors come back inside otherwise successful HTTP responses as
//! `{"errcode": ..., "errmsg": ...}` and surface as [`WechatError::Api`]:
//!
//! ```rust,no_run
//! # use wechat_oplatform::{Client, Context, WechatError};
//! # async fn example(client: Client, ctx: Context) {
//! match client.code().release(&ctx, "token").await {
//!     Ok(response) => println!("released: {}", response.status()),
//!     Err(WechatError::Api(e)) => eprintln!("API error {}: {}", e.code, e.message),
//!     Err(e) if e.is_cancelled() => eprintln!("gave up: {e}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! # }
//! ```

pub mod api;
pub mod client;
pub mod context;
pub mod error;
pub mod middleware;
mod utils;

pub use client::{Client, ClientBuilder, Response, StreamResponse};
pub use context::Context;
pub use error::{ApiError, TransportError, WechatError};
