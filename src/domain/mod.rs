//! 领域层 - 后端 API 资源的客户端镜像
//!
//! 所有实体都是纯数据记录，与后端序列化格式一一对应。
//! 客户端不做本地校验：列表内容只反映最近一次成功的请求结果。

pub mod character;
pub mod novel;
pub mod story;
pub mod user;

pub use character::Character;
pub use novel::{
    ChunkAnnotation, ChunkContextMemory, Gender, Novel, SentenceAnnotation, TextChunk,
};
pub use story::Story;
pub use user::{Profile, Role, User};
