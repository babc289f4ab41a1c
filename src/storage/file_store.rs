//! JSON 文件存储
//!
//! 问题库和实体目录各写一个文件。写入先落到同目录的临时文件再重命名，
//! 进程中途退出不会留下半截文件。

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::models::entity::EntityCatalog;
use crate::models::question::QuestionBank;
use crate::storage::repository::StateStore;

/// 文件存储实现
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    questions_path: PathBuf,
    entities_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(questions_path: impl Into<PathBuf>, entities_path: impl Into<PathBuf>) -> Self {
        Self {
            questions_path: questions_path.into(),
            entities_path: entities_path.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.questions_path(), config.entities_path())
    }

    pub fn questions_path(&self) -> &Path {
        &self.questions_path
    }

    pub fn entities_path(&self) -> &Path {
        &self.entities_path
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "读取 {} 失败: {}",
                    path.display(),
                    e
                )));
            }
        };

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Serialization(format!("解析 {} 失败: {}", path.display(), e))
        })?;
        Ok(Some(value))
    }

    async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("创建目录 {} 失败: {}", parent.display(), e))
            })?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| AppError::Storage(format!("写入 {} 失败: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| AppError::Storage(format!("替换 {} 失败: {}", path.display(), e)))?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load_question_bank(&self) -> Result<Option<QuestionBank>> {
        Self::read_json(&self.questions_path).await
    }

    async fn load_entity_catalog(&self) -> Result<Option<EntityCatalog>> {
        Self::read_json(&self.entities_path).await
    }

    async fn save_question_bank(&self, bank: &QuestionBank) -> Result<()> {
        Self::write_json(&self.questions_path, bank).await
    }

    async fn save_entity_catalog(&self, catalog: &EntityCatalog) -> Result<()> {
        Self::write_json(&self.entities_path, catalog).await
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
