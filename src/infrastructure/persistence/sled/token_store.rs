//! Sled Token Store - 会话凭证的持久化实现
//!
//! 两个固定键：`token`（access）与 `refresh_token`，
//! 值为带写入时间的 bincode 编码条目

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{TokenError, TokenPair, TokenStorePort};

const ACCESS_KEY: &str = "token";
const REFRESH_KEY: &str = "refresh_token";

/// Sled Token 存储配置
#[derive(Debug, Clone)]
pub struct SledTokenStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledTokenStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/tokens.sled".to_string(),
        }
    }
}

/// 内部存储条目
#[derive(Debug, Serialize, Deserialize)]
struct InternalTokenEntry {
    value: String,
    stored_at: i64,
}

/// Sled 凭证存储
pub struct SledTokenStore {
    db: Db,
}

impl SledTokenStore {
    /// 创建新的存储实例
    pub fn new(config: &SledTokenStoreConfig) -> Result<Self, TokenError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| TokenError::StorageError(e.to_string()))?;

        tracing::info!(db_path = %config.db_path, "SledTokenStore initialized");

        Ok(Self { db })
    }

    /// 打开指定路径的存储
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TokenError> {
        let config = SledTokenStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn read(&self, key: &str) -> Result<Option<String>, TokenError> {
        match self.db.get(key) {
            Ok(Some(data)) => {
                let entry: InternalTokenEntry = bincode::deserialize(&data)
                    .map_err(|e| TokenError::SerializationError(e.to_string()))?;
                Ok(Some(entry.value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(TokenError::StorageError(e.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), TokenError> {
        let entry = InternalTokenEntry {
            value: value.to_string(),
            stored_at: Utc::now().timestamp(),
        };
        let bytes = bincode::serialize(&entry)
            .map_err(|e| TokenError::SerializationError(e.to_string()))?;
        self.db
            .insert(key, bytes)
            .map_err(|e| TokenError::StorageError(e.to_string()))?;
        Ok(())
    }
}

impl TokenStorePort for SledTokenStore {
    fn access_token(&self) -> Result<Option<String>, TokenError> {
        self.read(ACCESS_KEY)
    }

    fn refresh_token(&self) -> Result<Option<String>, TokenError> {
        self.read(REFRESH_KEY)
    }

    fn store(&self, pair: &TokenPair) -> Result<(), TokenError> {
        self.write(ACCESS_KEY, &pair.access)?;
        if let Some(refresh) = &pair.refresh {
            self.write(REFRESH_KEY, refresh)?;
        }
        self.db
            .flush()
            .map_err(|e| TokenError::StorageError(e.to_string()))?;

        tracing::debug!(has_refresh = pair.refresh.is_some(), "Tokens stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenError> {
        self.db
            .remove(ACCESS_KEY)
            .map_err(|e| TokenError::StorageError(e.to_string()))?;
        self.db
            .remove(REFRESH_KEY)
            .map_err(|e| TokenError::StorageError(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| TokenError::StorageError(e.to_string()))?;

        tracing::debug!("Tokens cleared");
        Ok(())
    }
}
