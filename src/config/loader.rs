//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::ClientConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `STORYPHONIC_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `STORYPHONIC_API__BASE_URL=http://api.example.com`
/// - `STORYPHONIC_API__TIMEOUT_SECS=10`
/// - `STORYPHONIC_STORAGE__TOKENS_PATH=/data/tokens.sled`
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("api.base_url", "http://localhost:8000")?
        .set_default("api.timeout_secs", 30)?
        .set_default(
            "google.userinfo_url",
            "https://www.googleapis.com/oauth2/v3/userinfo",
        )?
        .set_default("storage.tokens_path", "data/tokens.sled")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: STORYPHONIC_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("STORYPHONIC")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let client_config: ClientConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    validate_config(&client_config)?;

    Ok(client_config)
}

/// 验证配置有效性
fn validate_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.api.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "API base URL cannot be empty".to_string(),
        ));
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "API timeout cannot be 0".to_string(),
        ));
    }

    if config.google.userinfo_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Google userinfo URL cannot be empty".to_string(),
        ));
    }

    if config.storage.tokens_path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Tokens path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &ClientConfig) {
    tracing::info!("=== Client Configuration ===");
    tracing::info!("API Base URL: {}", config.api.base_url);
    tracing::info!("API Timeout: {}s", config.api.timeout_secs);
    tracing::info!("Google Userinfo URL: {}", config.google.userinfo_url);
    tracing::info!("Tokens Path: {}", config.storage.tokens_path);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("============================");
}
