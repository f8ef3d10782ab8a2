//! Story - 阅读练习素材

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 练习故事
///
/// 与小说不同，story 由平台提供、整型自增 id，无软删除标记
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub level: i64,
    pub points: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
