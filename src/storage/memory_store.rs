//! 内存存储
//!
//! 不落盘，用于测试和 `backend = "memory"` 的临时部署。

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::entity::EntityCatalog;
use crate::models::question::QuestionBank;
use crate::storage::repository::StateStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    question_bank: RwLock<Option<QuestionBank>>,
    entity_catalog: RwLock<Option<EntityCatalog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load_question_bank(&self) -> Result<Option<QuestionBank>> {
        Ok(self.question_bank.read().await.clone())
    }

    async fn load_entity_catalog(&self) -> Result<Option<EntityCatalog>> {
        Ok(self.entity_catalog.read().await.clone())
    }

    async fn save_question_bank(&self, bank: &QuestionBank) -> Result<()> {
        *self.question_bank.write().await = Some(bank.clone());
        Ok(())
    }

    async fn save_entity_catalog(&self, catalog: &EntityCatalog) -> Result<()> {
        *self.entity_catalog.write().await = Some(catalog.clone());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed;

    #[tokio::test]
    async fn test_empty_then_saved() {
        let store = MemoryStore::new();
        assert!(store.load_question_bank().await.unwrap().is_none());

        let bank = seed::question_bank();
        store.save_question_bank(&bank).await.unwrap();
        assert_eq!(store.load_question_bank().await.unwrap(), Some(bank));
        assert!(store.load_entity_catalog().await.unwrap().is_none());
    }
}
