//! StoryPhonic Client - 会话状态演示入口
//!
//! 加载配置、初始化日志，用持久化的凭证尝试恢复会话：
//! 已登录则列出账号下的小说，未登录则提示

use std::sync::Arc;

use storyphonic::application::{AuthSession, NovelStore};
use storyphonic::config::{load_config, print_config};
use storyphonic::infrastructure::http::{ApiClient, ApiClientConfig};
use storyphonic::infrastructure::persistence::sled::SledTokenStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},storyphonic={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("StoryPhonic Client");
    print_config(&config);

    // 确保凭证数据库目录存在
    if let Some(parent) = std::path::Path::new(&config.storage.tokens_path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 凭证存储 + API 客户端 + 会话
    let tokens = SledTokenStore::open(&config.storage.tokens_path)
        .map_err(|e| anyhow::anyhow!("Failed to open token store: {}", e))?
        .arc();

    let api_config = ApiClientConfig::new(&config.api.base_url).with_timeout(config.api.timeout_secs);
    let api = Arc::new(ApiClient::new(api_config)?);

    let session = AuthSession::new(api.clone(), tokens.clone());

    // 用存储的凭证尝试恢复会话
    if session.check_auth().await? {
        if let Some(user) = session.current_user() {
            tracing::info!(email = %user.email, "Session restored");
        }

        let novels = NovelStore::new(api, tokens);
        match novels.fetch_novels().await {
            Ok(list) => {
                tracing::info!(count = list.len(), "Novels fetched");
                for novel in list {
                    tracing::info!(id = %novel.id, name = %novel.name, status = %novel.status, "Novel");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to fetch novels"),
        }
    } else {
        tracing::info!("No valid session, log in first");
    }

    Ok(())
}
