//! Character - 小说角色

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 小说角色
///
/// `character_info` 是标注流水线抽取出的角色设定文本，客户端可编辑后回写
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub novel: Uuid,
    pub name: String,
    #[serde(default)]
    pub character_info: String,
    pub index: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}
