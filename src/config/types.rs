//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    /// 后端 API 配置
    #[serde(default)]
    pub api: ApiConfig,

    /// Google 身份配置
    #[serde(default)]
    pub google: GoogleConfig,

    /// 本地存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 后端 API 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 后端基础 URL
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            timeout_secs: default_api_timeout(),
        }
    }
}

/// Google 身份配置
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// userinfo 接口 URL
    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
}

fn default_userinfo_url() -> String {
    "https://www.googleapis.com/oauth2/v3/userinfo".to_string()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            userinfo_url: default_userinfo_url(),
        }
    }
}

/// 本地存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 凭证数据库路径
    #[serde(default = "default_tokens_path")]
    pub tokens_path: String,
}

fn default_tokens_path() -> String {
    "data/tokens.sled".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            tokens_path: default_tokens_path(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
