//! API Client - StoryPhonic 后端 HTTP 客户端
//!
//! 所有请求走同一模板：
//! - 按需附加 `Authorization: Bearer <token>` 头
//! - 非 2xx 时解析 JSON 错误体的 `detail` / `error` 字段，缺失则回退到通用消息
//! - 2xx 时把 JSON 响应体解码为目标类型

use reqwest::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::application::error::ClientError;

/// API 客户端配置
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// 后端基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// StoryPhonic API 客户端
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(config: ApiClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Result<Self, ClientError> {
        Self::new(ApiClientConfig::default())
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// 拼接请求 URL
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// GET 并解码 JSON 响应
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let request = self.client.get(self.url(path));
        Self::execute(Self::bearer(request, token)).await
    }

    /// POST JSON 请求体并解码 JSON 响应
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let request = self.client.post(self.url(path)).json(body);
        Self::execute(Self::bearer(request, token)).await
    }

    /// POST JSON 请求体，成功时忽略响应体（后端可能返回空体）
    pub async fn post_json_ignore_response<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }
        Ok(())
    }

    /// POST 空请求体并解码 JSON 响应
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ClientError> {
        let request = self.client.post(self.url(path)).bearer_auth(token);
        Self::execute(request).await
    }

    /// POST multipart 表单（文件上传）并解码 JSON 响应
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
        token: &str,
    ) -> Result<T, ClientError> {
        let request = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form);
        Self::execute(request).await
    }

    /// PUT JSON 请求体并解码 JSON 响应
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<T, ClientError> {
        let request = self.client.put(self.url(path)).json(body).bearer_auth(token);
        Self::execute(request).await
    }

    /// DELETE，成功时忽略响应体（后端返回 204 或空体）
    pub async fn delete(&self, path: &str, token: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }
        Ok(())
    }

    fn bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error_body(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Network(format!("Request timed out: {}", e))
    } else if e.is_connect() {
        ClientError::Network(format!("Cannot connect to backend: {}", e))
    } else {
        ClientError::Network(e.to_string())
    }
}

/// 从错误响应体提取消息
///
/// 后端错误体约定携带 `detail` 或 `error` 字符串字段，
/// 解析失败或字段缺失时回退到 `HTTP <status>`
pub(crate) fn parse_error_body(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| format!("HTTP {}", status));

    ClientError::Api { status, message }
}
