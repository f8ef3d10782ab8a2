//! Novel Store - 小说列表与当前选中项

use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::application::error::ClientError;
use crate::application::ports::TokenStorePort;
use crate::application::template::{record_error, require_token, LoadingGuard, OpState};
use crate::domain::Novel;
use crate::infrastructure::http::dto::{CreateAudiobookResponse, NewNovel};
use crate::infrastructure::http::ApiClient;

/// 小说 store 状态快照
#[derive(Debug, Clone, Default)]
pub struct NovelState {
    pub novels: Vec<Novel>,
    pub current: Option<Novel>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OpState for NovelState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// 小说 store
pub struct NovelStore {
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStorePort>,
    state: RwLock<NovelState>,
}

impl NovelStore {
    pub fn new(api: Arc<ApiClient>, tokens: Arc<dyn TokenStorePort>) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(NovelState::default()),
        }
    }

    pub fn state(&self) -> NovelState {
        self.state.read().unwrap().clone()
    }

    pub fn novels(&self) -> Vec<Novel> {
        self.state.read().unwrap().novels.clone()
    }

    pub fn current(&self) -> Option<Novel> {
        self.state.read().unwrap().current.clone()
    }

    /// 拉取小说列表，整体替换本地列表
    pub async fn fetch_novels(&self) -> Result<Vec<Novel>, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_novels().await;
        record_error(&self.state, result)
    }

    async fn do_fetch_novels(&self) -> Result<Vec<Novel>, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let novels: Vec<Novel> = self
            .api
            .get_json("/api/audiobook/novels/", Some(&token))
            .await?;

        tracing::debug!(count = novels.len(), "Novels fetched");
        self.state.write().unwrap().novels = novels.clone();
        Ok(novels)
    }

    /// 按 id 拉取单本小说，设为当前选中项
    pub async fn fetch_novel(&self, id: Uuid) -> Result<Novel, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_novel(id).await;
        record_error(&self.state, result)
    }

    async fn do_fetch_novel(&self, id: Uuid) -> Result<Novel, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let novel: Novel = self
            .api
            .get_json(&format!("/api/audiobook/novels/{}/", id), Some(&token))
            .await?;

        self.state.write().unwrap().current = Some(novel.clone());
        Ok(novel)
    }

    /// 新建小说（multipart：名称 + 内联文本 / 上传文件），成功后追加到列表
    pub async fn create_novel(&self, data: NewNovel) -> Result<Novel, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_create_novel(data).await;
        record_error(&self.state, result)
    }

    async fn do_create_novel(&self, data: NewNovel) -> Result<Novel, ClientError> {
        let token = require_token(self.tokens.as_ref())?;

        let mut form = reqwest::multipart::Form::new().text("name", data.name);
        if let Some(content) = data.content {
            form = form.text("content", content);
        }
        if let Some(file) = data.content_file {
            let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            form = form.part("content_file", part);
        }

        let novel: Novel = self
            .api
            .post_multipart("/api/audiobook/novels/", form, &token)
            .await?;

        tracing::info!(novel_id = %novel.id, name = %novel.name, "Novel created");
        self.state.write().unwrap().novels.push(novel.clone());
        Ok(novel)
    }

    /// 触发有声书合成任务，不变更本地列表
    pub async fn create_audiobook(&self, id: Uuid) -> Result<CreateAudiobookResponse, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_create_audiobook(id).await;
        record_error(&self.state, result)
    }

    async fn do_create_audiobook(&self, id: Uuid) -> Result<CreateAudiobookResponse, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let response: CreateAudiobookResponse = self
            .api
            .post_empty(
                &format!("/api/audiobook/novels/{}/create_audiobook/", id),
                &token,
            )
            .await?;

        tracing::info!(novel_id = %id, "Audiobook creation requested");
        Ok(response)
    }

    /// 软删除：后端打标记，本地把条目过滤掉；
    /// 被删的是当前选中项时同时清除选中
    pub async fn soft_delete_novel(&self, id: Uuid) -> Result<(), ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_soft_delete_novel(id).await;
        record_error(&self.state, result)
    }

    async fn do_soft_delete_novel(&self, id: Uuid) -> Result<(), ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        self.api
            .delete(&format!("/api/audiobook/novels/{}/", id), &token)
            .await?;

        let mut state = self.state.write().unwrap();
        state.novels.retain(|novel| novel.id != id);
        if state.current.as_ref().map(|n| n.id) == Some(id) {
            state.current = None;
        }
        tracing::info!(novel_id = %id, "Novel soft-deleted");
        Ok(())
    }
}
