//! Identity Provider Port - 外部身份提供方（Google OAuth）
//!
//! 把弹窗授权流程建模为显式接口：
//! 1. `AccessTokenSource` 发起授权请求，返回在回调完成时解析的 token
//! 2. `IdentityProviderPort::authorize` 用 token 换取用户信息
//!
//! 会话逻辑只依赖这两个抽象，不包含任何脚本注入类副作用

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 身份提供方错误
#[derive(Debug, Error)]
pub enum IdentityError {
    /// 用户取消或授权流程未完成
    #[error("Authorization was not completed: {0}")]
    AuthorizationFailed(String),

    #[error("Identity provider network error: {0}")]
    NetworkError(String),

    #[error("Invalid identity provider response: {0}")]
    InvalidResponse(String),
}

/// 提供方返回的用户信息
///
/// 字段命名与 Google userinfo 接口一致，原样转发给后端 callback 接口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUserInfo {
    pub email: String,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// 授权 token 来源
///
/// 实现方负责与用户交互（弹窗、本地回调等），
/// future 在回调完成时解析出提供方的 access token
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, IdentityError>;
}

/// Identity Provider Port
#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    /// 完成一次授权：请求 token，换取用户信息
    async fn authorize(&self) -> Result<ProviderUserInfo, IdentityError>;
}
