//! Novel Context - 小说及其标注产物
//!
//! 小说上传后由后端流水线切块、标注、合成音频，
//! 客户端只读取各阶段产物，不参与处理。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 小说
///
/// 删除是后端的软删除标记；客户端在删除成功后同时把条目从本地列表过滤掉
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Novel {
    pub id: Uuid,
    /// 所属用户
    pub user: Uuid,
    pub name: String,
    #[serde(default)]
    pub content: String,
    /// 处理状态（后端流水线阶段，原样透传）
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// 合成完成后生成的音频元数据 URL
    #[serde(default)]
    pub s3_audio_metadata_url: Option<String>,
    /// 合成完成后生成的音频文件 URL
    #[serde(default)]
    pub s3_audio_file_url: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// 文本块 - 切分流水线的中间产物
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    pub id: Uuid,
    pub novel: Uuid,
    pub content: String,
    pub index: i64,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// 文本块标注（原文 / 清洗后文本）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkAnnotation {
    pub id: Uuid,
    pub novel: Uuid,
    pub raw_text: String,
    pub clean_text: String,
    pub index: i64,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// 文本块上下文记忆（标注流水线跨块传递的状态）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkContextMemory {
    pub id: Uuid,
    pub novel: Uuid,
    pub content: String,
    pub index: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// 说话人性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// 句级标注 - TTS 渲染使用的语音/情绪/身份元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnnotation {
    pub id: Uuid,
    pub novel: Uuid,
    pub context: String,
    pub index: i64,
    /// 句子类型（dialogue / narration 等，原样透传）
    #[serde(rename = "type")]
    pub kind: String,
    pub raw_character: String,
    pub emotion: String,
    pub identity: Option<String>,
    pub gender: Gender,
    pub voice_actor: String,
    /// 所属文本块标注
    pub chunk_annotation_belong: Option<Uuid>,
    pub chunk_index: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}
