//! Google Identity Adapter - 调用 Google userinfo 接口
//!
//! 实现 IdentityProviderPort：先通过 AccessTokenSource 拿到
//! 提供方 access token（由外层 UI 的授权回调解析），再换取用户信息。
//!
//! 外部 API:
//! GET https://www.googleapis.com/oauth2/v3/userinfo
//! Authorization: Bearer <provider access token>

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AccessTokenSource, IdentityError, IdentityProviderPort, ProviderUserInfo,
};

/// Google 身份客户端配置
#[derive(Debug, Clone)]
pub struct GoogleIdentityConfig {
    /// userinfo 接口 URL
    pub userinfo_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleIdentityConfig {
    fn default() -> Self {
        Self {
            userinfo_url: "https://www.googleapis.com/oauth2/v3/userinfo".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GoogleIdentityConfig {
    pub fn new(userinfo_url: impl Into<String>) -> Self {
        Self {
            userinfo_url: userinfo_url.into(),
            ..Default::default()
        }
    }
}

/// Google 身份客户端
pub struct GoogleIdentityClient {
    client: Client,
    config: GoogleIdentityConfig,
    token_source: Arc<dyn AccessTokenSource>,
}

impl GoogleIdentityClient {
    /// 创建新的身份客户端
    pub fn new(
        config: GoogleIdentityConfig,
        token_source: Arc<dyn AccessTokenSource>,
    ) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IdentityError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            token_source,
        })
    }
}

#[async_trait]
impl IdentityProviderPort for GoogleIdentityClient {
    async fn authorize(&self) -> Result<ProviderUserInfo, IdentityError> {
        let access_token = self.token_source.access_token().await?;

        tracing::debug!(url = %self.config.userinfo_url, "Fetching provider user info");

        let response = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(|e| IdentityError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let user_info: ProviderUserInfo = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;

        tracing::info!(email = %user_info.email, "Provider user info fetched");
        Ok(user_info)
    }
}

/// 固定 token 来源
///
/// 测试与脚本场景用：跳过交互式授权，直接返回给定的 token
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String, IdentityError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = GoogleIdentityConfig::default();
        assert_eq!(
            config.userinfo_url,
            "https://www.googleapis.com/oauth2/v3/userinfo"
        );
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_static_token_source() {
        let source = StaticTokenSource::new("ya29.token");
        assert_eq!(source.access_token().await.unwrap(), "ya29.token");
    }
}
