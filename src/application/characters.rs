//! Character Store - 小说角色列表

use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::application::error::ClientError;
use crate::application::ports::TokenStorePort;
use crate::application::template::{record_error, require_token, LoadingGuard, OpState};
use crate::domain::Character;
use crate::infrastructure::http::dto::{CharacterPatch, CreateCharacterRequest, NewCharacter};
use crate::infrastructure::http::ApiClient;

/// 角色 store 状态快照
#[derive(Debug, Clone, Default)]
pub struct CharacterState {
    pub characters: Vec<Character>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OpState for CharacterState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// 角色 store
pub struct CharacterStore {
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStorePort>,
    state: RwLock<CharacterState>,
}

impl CharacterStore {
    pub fn new(api: Arc<ApiClient>, tokens: Arc<dyn TokenStorePort>) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(CharacterState::default()),
        }
    }

    pub fn state(&self) -> CharacterState {
        self.state.read().unwrap().clone()
    }

    pub fn characters(&self) -> Vec<Character> {
        self.state.read().unwrap().characters.clone()
    }

    /// 拉取某本小说的角色，整体替换本地列表
    pub async fn fetch_characters(&self, novel_id: Uuid) -> Result<Vec<Character>, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_characters(novel_id).await;
        record_error(&self.state, result)
    }

    async fn do_fetch_characters(&self, novel_id: Uuid) -> Result<Vec<Character>, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let characters: Vec<Character> = self
            .api
            .get_json(&format!("/api/characters/?novel={}", novel_id), Some(&token))
            .await?;

        tracing::debug!(novel_id = %novel_id, count = characters.len(), "Characters fetched");
        self.state.write().unwrap().characters = characters.clone();
        Ok(characters)
    }

    /// 新建角色，成功后追加到列表
    pub async fn create_character(
        &self,
        novel_id: Uuid,
        data: &NewCharacter,
    ) -> Result<Character, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_create_character(novel_id, data).await;
        record_error(&self.state, result)
    }

    async fn do_create_character(
        &self,
        novel_id: Uuid,
        data: &NewCharacter,
    ) -> Result<Character, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let body = CreateCharacterRequest {
            data,
            novel: novel_id,
        };
        let character: Character = self
            .api
            .post_json("/api/characters/", &body, Some(&token))
            .await?;

        tracing::info!(character_id = %character.id, "Character created");
        self.state.write().unwrap().characters.push(character.clone());
        Ok(character)
    }

    /// 更新角色：只替换列表中 id 匹配的那一项，保持顺序不变
    pub async fn update_character(
        &self,
        id: Uuid,
        patch: &CharacterPatch,
    ) -> Result<Character, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_update_character(id, patch).await;
        record_error(&self.state, result)
    }

    async fn do_update_character(
        &self,
        id: Uuid,
        patch: &CharacterPatch,
    ) -> Result<Character, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let character: Character = self
            .api
            .put_json(&format!("/api/characters/{}/", id), patch, &token)
            .await?;

        let mut state = self.state.write().unwrap();
        if let Some(slot) = state.characters.iter_mut().find(|c| c.id == id) {
            *slot = character.clone();
        }
        tracing::debug!(character_id = %id, "Character updated");
        Ok(character)
    }

    /// 删除角色，本地把条目过滤掉
    pub async fn delete_character(&self, id: Uuid) -> Result<(), ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_delete_character(id).await;
        record_error(&self.state, result)
    }

    async fn do_delete_character(&self, id: Uuid) -> Result<(), ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        self.api
            .delete(&format!("/api/characters/{}/", id), &token)
            .await?;

        self.state.write().unwrap().characters.retain(|c| c.id != id);
        tracing::info!(character_id = %id, "Character deleted");
        Ok(())
    }
}
