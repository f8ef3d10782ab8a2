//! 外部服务适配器

pub mod google;

pub use google::{GoogleIdentityClient, GoogleIdentityConfig, StaticTokenSource};
