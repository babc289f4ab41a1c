//! 存储层模块
//!
//! 提供问题库与实体目录的持久化服务，支持 JSON 文件和内存两种后端。

pub mod factory;
pub mod file_store;
pub mod memory_store;
pub mod repository;

pub use factory::StorageFactory;
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use repository::StateStore;
