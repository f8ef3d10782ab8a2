//! StoryPhonic Client - 有声小说平台的数据访问层
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 后端 API 资源的客户端镜像（User / Novel / Character / 标注 / Story）
//!
//! 应用层 (application/):
//! - Stores: 会话（核心）与各资源 CRUD store，统一的 loading / error 约定
//! - Ports: 端口定义（TokenStore, IdentityProvider）
//! - Routing: 路由守卫
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 后端 API 客户端（reqwest）与 DTO
//! - Persistence: sled 凭证持久化（键 `token` / `refresh_token`）
//! - Memory: 内存凭证存储
//! - Adapters: Google 身份适配器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{
    AuthSession, ClientError, RouteDecision, RouteGuard, TokenPair, TokenStorePort,
};
pub use config::{load_config, ClientConfig};
pub use infrastructure::http::{ApiClient, ApiClientConfig};
