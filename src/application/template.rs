//! 共享操作模板
//!
//! 每个 store 的操作都遵循同一套约定：
//! 1. 读取存储的 access token，缺失则立即失败，不发请求
//! 2. 进入操作时置 loading、清空 error
//! 3. 失败消息写入 error 字段，同时原样返回给调用方
//! 4. 无论成败，loading 由 drop guard 兜底清除
//!
//! loading 标志不做引用计数：同一 store 上并发的操作会互相覆盖，
//! 后完成的响应覆盖共享状态（与被镜像的前端行为一致）

use std::sync::RwLock;

use crate::application::error::ClientError;
use crate::application::ports::TokenStorePort;

/// 携带 loading / error 标志的操作状态
pub(crate) trait OpState {
    fn set_loading(&mut self, loading: bool);
    fn set_error(&mut self, error: Option<String>);
}

/// loading 标志的 drop guard
///
/// 构造时置 loading 并清空 error，drop 时清除 loading
pub(crate) struct LoadingGuard<'a, S: OpState> {
    state: &'a RwLock<S>,
}

impl<'a, S: OpState> LoadingGuard<'a, S> {
    pub fn begin(state: &'a RwLock<S>) -> Self {
        {
            let mut s = state.write().unwrap();
            s.set_loading(true);
            s.set_error(None);
        }
        Self { state }
    }
}

impl<S: OpState> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        self.state.write().unwrap().set_loading(false);
    }
}

/// 失败时把消息写入 error 字段，结果原样返回
pub(crate) fn record_error<S: OpState, T>(
    state: &RwLock<S>,
    result: Result<T, ClientError>,
) -> Result<T, ClientError> {
    if let Err(e) = &result {
        state.write().unwrap().set_error(Some(e.to_string()));
    }
    result
}

/// 读取存储的 access token，缺失视为前置条件失败
pub(crate) fn require_token(tokens: &dyn TokenStorePort) -> Result<String, ClientError> {
    tokens
        .access_token()?
        .ok_or(ClientError::NotAuthenticated)
}
