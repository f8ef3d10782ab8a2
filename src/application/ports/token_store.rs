//! Token Store Port - 会话凭证的持久化
//!
//! 定义凭证存取的抽象接口，具体实现在 infrastructure/persistence 层
//! （sled 持久化）与 infrastructure/memory 层（内存实现）

use thiserror::Error;

/// Token 存储错误
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token storage error: {0}")]
    StorageError(String),

    #[error("Token serialization error: {0}")]
    SerializationError(String),
}

/// 一次登录换取的凭证对
///
/// register 接口只返回 access token，因此 refresh 是可选的
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// 短期凭证，附加在每个请求的 Authorization 头上
    pub access: String,
    /// 长期凭证，用于会话续期
    pub refresh: Option<String>,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: Some(refresh.into()),
        }
    }

    pub fn access_only(access: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: None,
        }
    }
}

/// Token Store Port
///
/// 单标签页假设：读写不做跨进程同步
pub trait TokenStorePort: Send + Sync {
    /// 读取 access token
    fn access_token(&self) -> Result<Option<String>, TokenError>;

    /// 读取 refresh token
    fn refresh_token(&self) -> Result<Option<String>, TokenError>;

    /// 写入凭证对（refresh 为 None 时只写 access）
    fn store(&self, pair: &TokenPair) -> Result<(), TokenError>;

    /// 清除所有凭证
    fn clear(&self) -> Result<(), TokenError>;
}
