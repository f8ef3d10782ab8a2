//! Annotation Store - 标注流水线产物（只读）
//!
//! 块标注、句级标注、上下文记忆都由后端流水线生成，
//! 客户端只按小说拉取，不提供写操作

use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::application::error::ClientError;
use crate::application::ports::TokenStorePort;
use crate::application::template::{record_error, require_token, LoadingGuard, OpState};
use crate::domain::{ChunkAnnotation, ChunkContextMemory, SentenceAnnotation};
use crate::infrastructure::http::ApiClient;

/// 标注 store 状态快照
#[derive(Debug, Clone, Default)]
pub struct AnnotationState {
    pub chunk_annotations: Vec<ChunkAnnotation>,
    pub sentence_annotations: Vec<SentenceAnnotation>,
    pub context_memories: Vec<ChunkContextMemory>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OpState for AnnotationState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// 标注 store
pub struct AnnotationStore {
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStorePort>,
    state: RwLock<AnnotationState>,
}

impl AnnotationStore {
    pub fn new(api: Arc<ApiClient>, tokens: Arc<dyn TokenStorePort>) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(AnnotationState::default()),
        }
    }

    pub fn state(&self) -> AnnotationState {
        self.state.read().unwrap().clone()
    }

    /// 拉取文本块标注
    pub async fn fetch_chunk_annotations(
        &self,
        novel_id: Uuid,
    ) -> Result<Vec<ChunkAnnotation>, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_chunk_annotations(novel_id).await;
        record_error(&self.state, result)
    }

    async fn do_fetch_chunk_annotations(
        &self,
        novel_id: Uuid,
    ) -> Result<Vec<ChunkAnnotation>, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let annotations: Vec<ChunkAnnotation> = self
            .api
            .get_json(
                &format!("/api/chunk-annotations/?novel={}", novel_id),
                Some(&token),
            )
            .await?;

        tracing::debug!(novel_id = %novel_id, count = annotations.len(), "Chunk annotations fetched");
        self.state.write().unwrap().chunk_annotations = annotations.clone();
        Ok(annotations)
    }

    /// 拉取句级标注
    pub async fn fetch_sentence_annotations(
        &self,
        novel_id: Uuid,
    ) -> Result<Vec<SentenceAnnotation>, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_sentence_annotations(novel_id).await;
        record_error(&self.state, result)
    }

    async fn do_fetch_sentence_annotations(
        &self,
        novel_id: Uuid,
    ) -> Result<Vec<SentenceAnnotation>, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let annotations: Vec<SentenceAnnotation> = self
            .api
            .get_json(
                &format!("/api/sentence-annotations/?novel={}", novel_id),
                Some(&token),
            )
            .await?;

        self.state.write().unwrap().sentence_annotations = annotations.clone();
        Ok(annotations)
    }

    /// 拉取上下文记忆
    pub async fn fetch_context_memories(
        &self,
        novel_id: Uuid,
    ) -> Result<Vec<ChunkContextMemory>, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_context_memories(novel_id).await;
        record_error(&self.state, result)
    }

    async fn do_fetch_context_memories(
        &self,
        novel_id: Uuid,
    ) -> Result<Vec<ChunkContextMemory>, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let memories: Vec<ChunkContextMemory> = self
            .api
            .get_json(
                &format!("/api/chunk-context-memories/?novel={}", novel_id),
                Some(&token),
            )
            .await?;

        self.state.write().unwrap().context_memories = memories.clone();
        Ok(memories)
    }
}
