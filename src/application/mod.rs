//! 应用层 - 数据访问 store 与端口
//!
//! 包含：
//! - session: 会话 / 认证 store（核心）
//! - novels / characters / annotations / stories: 资源 CRUD store
//! - routing: 路由守卫
//! - ports: 端口定义（TokenStore、IdentityProvider）
//! - error: 统一错误定义
//! - template: 各 store 共享的操作模板

pub mod annotations;
pub mod characters;
pub mod error;
pub mod novels;
pub mod ports;
pub mod routing;
pub mod session;
pub mod stories;
pub(crate) mod template;

pub use annotations::{AnnotationState, AnnotationStore};
pub use characters::{CharacterState, CharacterStore};
pub use error::ClientError;
pub use novels::{NovelState, NovelStore};
pub use routing::{RouteDecision, RouteGuard, DASHBOARD_PATH, LOGIN_PATH, PUBLIC_PATHS};
pub use session::{AuthSession, SessionState};
pub use stories::{StoryState, StoryStore};

pub use ports::{
    AccessTokenSource, IdentityError, IdentityProviderPort, ProviderUserInfo, TokenError,
    TokenPair, TokenStorePort,
};
