//! 存储工厂模块
//!
//! 根据配置创建相应的状态存储实例。

use std::sync::Arc;

use crate::config::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use crate::storage::file_store::JsonFileStore;
use crate::storage::memory_store::MemoryStore;
use crate::storage::repository::StateStore;

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建存储实例
    pub fn create(config: &StorageConfig) -> Arc<dyn StateStore> {
        match config.backend {
            StorageBackend::File => Arc::new(JsonFileStore::from_config(config)),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        }
    }

    /// 检查存储是否可读
    pub async fn health_check(store: &dyn StateStore) -> Result<bool> {
        store.load_question_bank().await?;
        Ok(true)
    }
}
