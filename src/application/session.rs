//! Session Store - 会话与认证状态
//!
//! 持有当前用户 / 资料视图和瞬态的 loading / error 标志，
//! 凭证通过 TokenStorePort 落盘（键 `token` / `refresh_token`）。
//!
//! 失败即关闭：check_auth 遇到任何失败都会执行 logout 清空会话，
//! 而不是把错误交给调用方恢复。

use std::sync::{Arc, RwLock};

use crate::application::error::ClientError;
use crate::application::ports::{IdentityProviderPort, TokenPair, TokenStorePort};
use crate::application::template::{record_error, require_token, LoadingGuard, OpState};
use crate::domain::{Profile, User};
use crate::infrastructure::http::dto::{
    AvatarResponse, ChangePasswordData, FileUpload, GoogleCallbackRequest, GoogleCallbackResponse,
    LoginCredentials, LoginRequest, RegisterData, RegisterResponse, TokenPairResponse,
    UpdateProfileData, UpdateProfileResponse,
};
use crate::infrastructure::http::ApiClient;

/// 会话状态快照
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub loading: bool,
    pub error: Option<String>,
}

impl OpState for SessionState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }
    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

/// 会话 store
///
/// 由应用启动时创建、通过 `Arc` 注入各消费方；logout 后实例仍可复用
/// （状态已清空），进程退出时随 Arc 一起释放
pub struct AuthSession {
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStorePort>,
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new(api: Arc<ApiClient>, tokens: Arc<dyn TokenStorePort>) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 当前状态快照
    pub fn state(&self) -> SessionState {
        self.state.read().unwrap().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read().unwrap().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().user.is_some()
    }

    /// 本地是否存有 access token（不校验有效性）
    pub fn has_stored_token(&self) -> Result<bool, ClientError> {
        Ok(self.tokens.access_token()?.is_some())
    }

    /// 邮箱 + 密码登录
    ///
    /// 成功后持久化两个 token，并重新拉取当前用户填充状态
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_login(credentials).await;
        record_error(&self.state, result)
    }

    async fn do_login(&self, credentials: &LoginCredentials) -> Result<(), ClientError> {
        let body = LoginRequest {
            username: &credentials.email,
            password: &credentials.password,
            email: &credentials.email,
        };
        let tokens: TokenPairResponse = self
            .api
            .post_json("/api/oauth/token/", &body, None)
            .await?;

        self.tokens
            .store(&TokenPair::new(tokens.access, tokens.refresh))?;

        tracing::info!(email = %credentials.email, "Login succeeded");

        // 与镜像的前端一致：用 me 接口回填用户，失败不让登录报错
        self.check_auth().await?;
        Ok(())
    }

    /// 注册新账号并保存返回的会话
    pub async fn register(&self, data: &RegisterData) -> Result<(), ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_register(data).await;
        record_error(&self.state, result)
    }

    async fn do_register(&self, data: &RegisterData) -> Result<(), ClientError> {
        let response: RegisterResponse = self
            .api
            .post_json("/api/oauth/register/", data, None)
            .await?;

        self.tokens.store(&TokenPair::access_only(response.token))?;

        tracing::info!(email = %response.user.email, "Registration succeeded");
        self.state.write().unwrap().user = Some(response.user);
        Ok(())
    }

    /// 清空会话状态与存储的凭证
    ///
    /// 导航回公开落地页由路由守卫负责
    pub fn logout(&self) -> Result<(), ClientError> {
        {
            let mut state = self.state.write().unwrap();
            state.user = None;
            state.profile = None;
            state.error = None;
        }
        self.tokens.clear()?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// 校验存储的凭证并回填用户
    ///
    /// - 无 token：返回 `Ok(false)`，不发请求
    /// - me 接口成功：回填用户，返回 `Ok(true)`
    /// - me 接口任何失败：执行 logout（失败即关闭），返回 `Ok(false)`
    pub async fn check_auth(&self) -> Result<bool, ClientError> {
        let token = match self.tokens.access_token()? {
            Some(token) => token,
            None => return Ok(false),
        };

        match self.api.get_json::<User>("/api/oauth/me/", Some(&token)).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Auth check passed");
                self.state.write().unwrap().user = Some(user);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Auth check failed, clearing session");
                self.logout()?;
                Ok(false)
            }
        }
    }

    /// 拉取资料子资源
    pub async fn fetch_profile(&self) -> Result<Profile, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_fetch_profile().await;
        record_error(&self.state, result)
    }

    async fn do_fetch_profile(&self) -> Result<Profile, ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let profile: Profile = self
            .api
            .get_json("/api/oauth/profile/", Some(&token))
            .await?;

        self.state.write().unwrap().profile = Some(profile.clone());
        Ok(profile)
    }

    /// 更新资料，响应中出现的字段合并进当前用户
    pub async fn update_profile(&self, data: &UpdateProfileData) -> Result<(), ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_update_profile(data).await;
        record_error(&self.state, result)
    }

    async fn do_update_profile(&self, data: &UpdateProfileData) -> Result<(), ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        let response: UpdateProfileResponse = self
            .api
            .put_json("/api/oauth/profile/", data, &token)
            .await?;

        let mut state = self.state.write().unwrap();
        if let Some(user) = state.user.as_mut() {
            if let Some(first_name) = response.first_name {
                user.first_name = first_name;
            }
            if let Some(last_name) = response.last_name {
                user.last_name = last_name;
            }
            if let Some(email) = response.email {
                user.email = email;
            }
        }
        Ok(())
    }

    /// 修改密码
    pub async fn change_password(&self, data: &ChangePasswordData) -> Result<(), ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_change_password(data).await;
        record_error(&self.state, result)
    }

    async fn do_change_password(&self, data: &ChangePasswordData) -> Result<(), ClientError> {
        let token = require_token(self.tokens.as_ref())?;
        self.api
            .post_json_ignore_response("/api/oauth/change-password/", data, &token)
            .await
    }

    /// 上传头像（multipart），成功后更新当前用户的头像 URL
    pub async fn update_avatar(&self, file: FileUpload) -> Result<String, ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_update_avatar(file).await;
        record_error(&self.state, result)
    }

    async fn do_update_avatar(&self, file: FileUpload) -> Result<String, ClientError> {
        let token = require_token(self.tokens.as_ref())?;

        let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
        let form = reqwest::multipart::Form::new().part("avatar", part);

        let response: AvatarResponse = self
            .api
            .post_multipart("/api/oauth/avatar/", form, &token)
            .await?;

        let mut state = self.state.write().unwrap();
        if let Some(user) = state.user.as_mut() {
            user.avatar = Some(response.avatar.clone());
        }
        Ok(response.avatar)
    }

    /// Google 登录
    ///
    /// 通过外部身份提供方端口完成授权，把用户信息转发给后端换取会话
    pub async fn login_with_google(
        &self,
        provider: &dyn IdentityProviderPort,
    ) -> Result<(), ClientError> {
        let _guard = LoadingGuard::begin(&self.state);
        let result = self.do_login_with_google(provider).await;
        record_error(&self.state, result)
    }

    async fn do_login_with_google(
        &self,
        provider: &dyn IdentityProviderPort,
    ) -> Result<(), ClientError> {
        let user_info = provider.authorize().await?;

        let body = GoogleCallbackRequest {
            user_info: &user_info,
        };
        let response: GoogleCallbackResponse = self
            .api
            .post_json("/api/oauth/google/callback/", &body, None)
            .await?;

        self.tokens.store(&TokenPair::new(
            response.tokens.access,
            response.tokens.refresh,
        ))?;

        tracing::info!(email = %response.user.email, "Google login succeeded");
        self.state.write().unwrap().user = Some(response.user);
        Ok(())
    }
}
