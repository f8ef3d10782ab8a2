//! In-Memory Token Store Implementation
//!
//! 不落盘的凭证存储，用于测试与一次性会话

use std::sync::{Arc, RwLock};

use crate::application::ports::{TokenError, TokenPair, TokenStorePort};

#[derive(Debug, Default)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
}

/// 内存凭证存储
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    slots: RwLock<Slots>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置 access token（测试辅助）
    pub fn with_access_token(access: impl Into<String>) -> Self {
        Self {
            slots: RwLock::new(Slots {
                access: Some(access.into()),
                refresh: None,
            }),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl TokenStorePort for InMemoryTokenStore {
    fn access_token(&self) -> Result<Option<String>, TokenError> {
        Ok(self.slots.read().unwrap().access.clone())
    }

    fn refresh_token(&self) -> Result<Option<String>, TokenError> {
        Ok(self.slots.read().unwrap().refresh.clone())
    }

    fn store(&self, pair: &TokenPair) -> Result<(), TokenError> {
        let mut slots = self.slots.write().unwrap();
        slots.access = Some(pair.access.clone());
        if let Some(refresh) = &pair.refresh {
            slots.refresh = Some(refresh.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenError> {
        let mut slots = self.slots.write().unwrap();
        slots.access = None;
        slots.refresh = None;
        Ok(())
    }
}
