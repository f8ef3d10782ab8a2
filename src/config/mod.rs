//! 配置层

pub mod loader;
pub mod types;

pub use loader::{load_config, load_config_from_path, print_config, ConfigError};
pub use types::{ApiConfig, ClientConfig, GoogleConfig, LogConfig, StorageConfig};
