//! 内存实现

pub mod token_store;

pub use token_store::InMemoryTokenStore;
