//! 核心数据模型模块
//!
//! 定义猜测引擎的核心数据结构：Question, QuestionBank, Entity, EntityCatalog 等。

pub mod answer;
pub mod entity;
pub mod question;
pub mod seed;
pub mod taxonomy;

pub use answer::*;
pub use entity::*;
pub use question::*;
pub use taxonomy::*;
