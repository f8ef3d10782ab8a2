//! 基础设施层
//!
//! - http: 后端 API 客户端与 DTO
//! - persistence: sled 凭证持久化
//! - memory: 内存实现（测试与一次性会话）
//! - adapters: 外部服务适配器（Google 身份）

pub mod adapters;
pub mod http;
pub mod memory;
pub mod persistence;
