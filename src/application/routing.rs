//! Route Guard - 导航门禁
//!
//! 每次导航时咨询会话状态：
//! - 公开路径直接放行
//! - 已登录访问登录页 → 跳转仪表盘
//! - 未登录访问私有路径 → 跳转登录页

use crate::application::error::ClientError;
use crate::application::session::AuthSession;

/// 默认的公开路径
pub const PUBLIC_PATHS: &[&str] = &["/", "/login", "/signup", "/pricing", "/features"];

/// 登录页路径
pub const LOGIN_PATH: &str = "/login";

/// 登录后默认跳转的路径
pub const DASHBOARD_PATH: &str = "/dashboard";

/// 导航决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// 放行
    Allow,
    /// 跳转登录页
    RedirectToLogin,
    /// 跳转仪表盘
    RedirectToDashboard,
}

/// 路由守卫
pub struct RouteGuard {
    public_paths: Vec<String>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            public_paths: PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 自定义公开路径
    pub fn with_public_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            public_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }

    /// 裁决一次导航
    ///
    /// 先刷新会话（check_auth 失败即关闭会清空无效凭证），
    /// 再要求私有路径同时具备存储的 token 和已回填的用户
    pub async fn check(
        &self,
        session: &AuthSession,
        path: &str,
    ) -> Result<RouteDecision, ClientError> {
        session.check_auth().await?;

        let has_token = session.has_stored_token()?;
        let has_user = session.is_authenticated();

        if path == LOGIN_PATH && has_token && has_user {
            tracing::debug!(path = %path, "Already authenticated, redirecting to dashboard");
            return Ok(RouteDecision::RedirectToDashboard);
        }

        if !self.is_public(path) && (!has_token || !has_user) {
            tracing::debug!(path = %path, "Unauthenticated access, redirecting to login");
            return Ok(RouteDecision::RedirectToLogin);
        }

        Ok(RouteDecision::Allow)
    }
}
