//! Sled 持久化实现

pub mod token_store;

pub use token_store::{SledTokenStore, SledTokenStoreConfig};
