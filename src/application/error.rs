//! 应用层错误定义
//!
//! 统一的客户端错误分类：
//! - 前置条件失败（未登录，发起请求前即失败）
//! - HTTP 非 2xx（消息取自响应体的 detail / error 字段）
//! - 传输 / 解码异常
//! - 端口错误（Token 存储、外部身份提供方）

use thiserror::Error;

use crate::application::ports::{IdentityError, TokenError};

/// 客户端错误
#[derive(Debug, Error)]
pub enum ClientError {
    /// 本地没有存储的 access token，请求未发出
    #[error("Not authenticated")]
    NotAuthenticated,

    /// 后端返回非 2xx，消息来自错误响应体
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 网络传输失败
    #[error("Network error: {0}")]
    Network(String),

    /// 响应体解码失败
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Token 存储失败
    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenError),

    /// 外部身份提供方失败
    #[error("Identity provider error: {0}")]
    Identity(#[from] IdentityError),
}

impl ClientError {
    /// HTTP 状态码（仅 Api 变体）
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_is_body_message() {
        let err = ClientError::Api {
            status: 400,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_not_authenticated_has_no_status() {
        assert_eq!(ClientError::NotAuthenticated.status(), None);
    }
}
