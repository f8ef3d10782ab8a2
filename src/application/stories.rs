//! Story Store - 练习故事列表

use std::sync::{Arc, RwLock};

use crate::application::error::ClientError;
use crate::application::ports::TokenStorePort;
use crate::application::template::{record_error, require_token, LoadingGuard, OpState};
use crate::domain::Story;
use crate::infrastructure::http::ApiClient;

/// 故事 store 状态快照
#[derive(Debug, Clone, Default)]
pub struct StoryState {
    pub stories: Vec<Story>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OpState for StoryState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// 故事 store
pub struct StoryStore {
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStorePort>,
    state: RwLock<StoryState>,
}

impl StoryStore {
    pub fn new(api: Arc<ApiClient>, tokens: Arc<dyn TokenStorePort>) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(StoryState::default()),
        }
    }

    pub fn state(&self) -> StoryState {
        self.state.read().unwrap().clone()
    }

    pub fn stories(&self) -> Vec<Story> {
        self.state.read().unwrap().stories.clone()
    }

    /// 拉取故事列表，整体替换本地列表
    pub async fn fetch_stories(&self) -> Result<Vec<Story>, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_stories().await;
        record_error(&self.state, result)
    }

    async fn do_fetch_stories(&self) -> Result<Vec<Story>, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let stories: Vec<Story> = self.api.get_json("/api/stories/", Some(&token)).await?;

        tracing::debug!(count = stories.len(), "Stories fetched");
        self.state.write().unwrap().stories = stories.clone();
        Ok(stories)
    }

    /// 按 id 拉取单个故事，只返回，不变更列表
    pub async fn fetch_story(&self, id: i64) -> Result<Story, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_story(id).await;
        record_error(&self.state, result)
    }

    async fn do_fetch_story(&self, id: i64) -> Result<Story, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        self.api
            .get_json(&format!("/api/stories/{}/", id), Some(&token))
            .await
    }
}
