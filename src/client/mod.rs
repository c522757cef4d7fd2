//! WeChat HTTP Client module
//!
//! This module contains the [`Client`] transport core and its builder.

mod builder;
mod request;
mod response;
mod wechat_client;

pub use builder::ClientBuilder;
pub use response::{Response, StreamResponse};
pub use wechat_client::Client;
