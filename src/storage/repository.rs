use async_trait::async_trait;

use crate::error::Result;
use crate::models::entity::EntityCatalog;
use crate::models::question::QuestionBank;

/// 引擎状态仓储 trait
///
/// 问题库与实体目录是两条独立持久化的记录。`load_*` 返回 `None`
/// 表示尚无持久化状态，调用方回退到种子数据。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateStore: Send + Sync {
    /// 加载问题库
    async fn load_question_bank(&self) -> Result<Option<QuestionBank>>;

    /// 加载实体目录
    async fn load_entity_catalog(&self) -> Result<Option<EntityCatalog>>;

    /// 保存问题库
    async fn save_question_bank(&self, bank: &QuestionBank) -> Result<()>;

    /// 保存实体目录
    async fn save_entity_catalog(&self, catalog: &EntityCatalog) -> Result<()>;

    /// 后端名称，用于日志和健康检查
    fn backend_name(&self) -> &'static str;
}
