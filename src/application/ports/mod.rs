//! 端口定义
//!
//! - token_store: 会话凭证持久化
//! - identity: 外部身份提供方（Google OAuth）

pub mod identity;
pub mod token_store;

pub use identity::{AccessTokenSource, IdentityError, IdentityProviderPort, ProviderUserInfo};
pub use token_store::{TokenError, TokenPair, TokenStorePort};
